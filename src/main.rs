mod apple;
mod game;
mod grid;
mod snake;
mod term;

pub type GridInt = u16;
pub type Cell = (GridInt, GridInt);

fn main() {
    let mut game = game::SnakeGame::new();
    game.initialize();

    // The game loop takes care of exiting cleanly on Esc/CTRL+C
    game.play();
}
