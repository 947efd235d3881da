use torlife::grid::Grid;
use torlife::render::Renderer;
use torlife::render::Style;
use torlife::render::render;
use torlife::simulation::Simulation;

#[test]
fn glider_phases() -> anyhow::Result<()> {
    let glider = Grid::parse(
        "
        .O....
        ..O...
        OOO...
        ......
        ......
        ......
        ",
    )?;

    let mut renderer = Renderer::new(Style::default());
    let mut out = String::new();

    for (g, grid) in Simulation::new(glider).generations().take(5).enumerate() {
        out.push_str(&format!("--- generation {g}\n"));
        out.push_str(renderer.render(&grid));
    }

    insta::assert_snapshot!(out, @r"
    --- generation 0
    .O....
    ..O...
    OOO...
    ......
    ......
    ......
    --- generation 1
    ......
    O.O...
    .OO...
    .O....
    ......
    ......
    --- generation 2
    ......
    ..O...
    O.O...
    .OO...
    ......
    ......
    --- generation 3
    ......
    .O....
    ..OO..
    .OO...
    ......
    ......
    --- generation 4
    ......
    ..O...
    ...O..
    .OOO..
    ......
    ......
    ");

    Ok(())
}

#[test]
fn blinker_digits() -> anyhow::Result<()> {
    let blinker = Grid::with_alive(5, [(2, 1), (2, 2), (2, 3)])?;

    let mut sim = Simulation::new(blinker);
    let vertical = sim.step();

    insta::assert_snapshot!(render(vertical, Style::Digits), @r"
    0 0 0 0 0
    0 0 1 0 0
    0 0 1 0 0
    0 0 1 0 0
    0 0 0 0 0
    ");

    Ok(())
}

#[test]
fn glider_braille() -> anyhow::Result<()> {
    let glider = Grid::with_alive(8, [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])?;

    insta::assert_snapshot!(render(&glider, Style::Braille), @r"
    ⠬⠆⠀⠀
    ⠀⠀⠀⠀
    ");

    Ok(())
}
