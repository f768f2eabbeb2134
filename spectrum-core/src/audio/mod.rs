//! Audio capture and buffering with cpal

pub mod buffer;
pub mod input;
pub mod window;

pub use buffer::CaptureRingBuffer;
pub use input::AudioInput;
pub use window::SlidingWindow;
