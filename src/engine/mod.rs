// Engine modules: renderer, input, frame clock

pub mod game_loop;
pub mod input;
pub mod renderer;
