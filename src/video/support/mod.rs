pub mod ffmpeg;
pub mod probe;
pub mod runner;
pub mod utils;

#[cfg(test)]
pub mod testing;
