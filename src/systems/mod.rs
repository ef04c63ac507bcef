pub mod behaviors;
