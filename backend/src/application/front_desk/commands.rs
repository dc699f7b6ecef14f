pub mod day_passes;
