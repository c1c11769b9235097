pub mod environment;
pub mod object;

pub mod prelude {
    pub use super::{
        environment::*,
        object::*
    };
}
