//! Frame production: what one frame shows, how frames are spread over workers, and the driver
//! that wires a corpus into both.

pub mod assembler;
pub mod pipeline;
pub mod scheduler;
