pub use serde_with;

pub mod coordinate;
pub mod polygon;
pub mod waypoint;

pub trait ExampleData {
    fn example_data() -> Self;
}
