//! Lock-free SPSC ring buffer between the capture callback and the
//! analysis loop
//!
//! The cpal callback pushes downmixed samples from the audio thread;
//! the driver thread pops fixed-size chunks on its own schedule.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Single-producer single-consumer audio sample queue
pub struct CaptureRingBuffer {
    producer: HeapProducer<f64>,
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl CaptureRingBuffer {
    /// Create new ring buffer holding up to `capacity` samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<f64>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into the capture-side producer and analysis-side consumer
    pub fn split(self) -> (CaptureProducer, CaptureConsumer) {
        (
            CaptureProducer {
                producer: self.producer,
            },
            CaptureConsumer {
                consumer: self.consumer,
                capacity: self.capacity,
            },
        )
    }

    /// Get buffer capacity in samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Producer end, owned by the capture callback
pub struct CaptureProducer {
    producer: HeapProducer<f64>,
}

impl CaptureProducer {
    /// Write samples, returning how many fit
    ///
    /// A short write means the analysis loop is falling behind and the
    /// overflow is dropped; the queue never blocks the audio thread.
    pub fn write(&mut self, samples: &[f64]) -> usize {
        self.producer.push_slice(samples)
    }

    /// Get number of free slots
    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }
}

/// Consumer end, owned by the analysis loop
pub struct CaptureConsumer {
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl CaptureConsumer {
    /// Read up to `buffer.len()` samples, returning how many were available
    pub fn read(&mut self, buffer: &mut [f64]) -> usize {
        self.consumer.pop_slice(buffer)
    }

    /// Get number of queued samples
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    /// Get buffer capacity in samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let rb = CaptureRingBuffer::new(1024);
        let (mut producer, mut consumer) = rb.split();

        let chunk = vec![0.1, 0.2, 0.3, 0.4];
        assert_eq!(producer.write(&chunk), 4);

        let mut out = vec![0.0; 4];
        assert_eq!(consumer.read(&mut out), 4);
        assert_eq!(out, chunk);
        assert!(consumer.is_empty());
    }

    #[test]
    fn test_overflow_drops_excess() {
        let rb = CaptureRingBuffer::new(8);
        let (mut producer, mut consumer) = rb.split();

        let chunk = vec![1.0; 20];
        let written = producer.write(&chunk);
        assert_eq!(written, 8);
        assert_eq!(producer.free_len(), 0);

        let mut out = vec![0.0; 20];
        assert_eq!(consumer.read(&mut out), 8);
    }

    #[test]
    fn test_read_from_empty() {
        let rb = CaptureRingBuffer::new(64);
        let (_producer, mut consumer) = rb.split();

        let mut out = vec![0.0; 16];
        assert_eq!(consumer.read(&mut out), 0);
        assert_eq!(consumer.len(), 0);
    }
}
