//! Umbrella crate; see the member crates for the real documentation.

pub use factorlab_linalg as linalg;
pub use factorlab_random as random;
pub use factorlab_tasks as tasks;
