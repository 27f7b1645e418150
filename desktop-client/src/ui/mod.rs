mod app;
mod board;

pub use app::Puzzle2048App;
