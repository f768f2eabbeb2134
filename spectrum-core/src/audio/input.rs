//! Audio input capture using cpal
//!
//! Captures mono f32 blocks from the default input device and queues
//! them for the analysis loop. Interleaved multi-channel input is
//! downmixed to mono in the callback; the engine analyzes one channel.

use super::buffer::CaptureProducer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio input device found")]
    NoDevice,

    #[error("Failed to get device name: {0}")]
    DeviceName(String),

    #[error("Failed to get default config: {0}")]
    DefaultConfig(String),

    #[error("Failed to build stream: {0}")]
    BuildStream(String),

    #[error("Failed to play stream: {0}")]
    PlayStream(String),

    #[error("Device runs at {actual} Hz but the analyzer is configured for {expected} Hz. Change the device sample rate in system settings.")]
    SampleRateMismatch { expected: u32, actual: u32 },

    #[error("Audio capture stream failed")]
    StreamFailed,
}

/// Audio input device information
#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Audio input stream feeding the capture ring buffer
pub struct AudioInput {
    stream: Stream,
    device_info: AudioDeviceInfo,
    healthy: Arc<AtomicBool>,
}

impl AudioInput {
    /// Create audio input from the default device
    ///
    /// # Arguments
    /// * `producer` - Ring buffer producer for captured audio
    /// * `sample_rate` - Sample rate the analyzer was built for; the
    ///   device must already run at this rate
    pub fn from_default_device(
        producer: CaptureProducer,
        sample_rate: u32,
    ) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(AudioError::NoDevice)?;

        Self::from_device(device, producer, sample_rate)
    }

    /// Create audio input from a specific device
    pub fn from_device(
        device: Device,
        producer: CaptureProducer,
        sample_rate: u32,
    ) -> Result<Self, AudioError> {
        let name = device
            .name()
            .map_err(|e| AudioError::DeviceName(e.to_string()))?;

        let config = device
            .default_input_config()
            .map_err(|e| AudioError::DefaultConfig(e.to_string()))?;

        let actual_rate = config.sample_rate().0;

        // The projection matrix is built for one rate; refuse to start
        // at any other instead of analyzing mistuned bins.
        if actual_rate != sample_rate {
            return Err(AudioError::SampleRateMismatch {
                expected: sample_rate,
                actual: actual_rate,
            });
        }

        let channels = config.channels();

        let device_info = AudioDeviceInfo {
            name,
            sample_rate: actual_rate,
            channels,
        };

        let stream_config: StreamConfig = config.into();

        let producer = Arc::new(Mutex::new(producer));
        let producer_clone = Arc::clone(&producer);

        let healthy = Arc::new(AtomicBool::new(true));
        let healthy_clone = Arc::clone(&healthy);

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Downmix interleaved frames to mono f64
                    let ch = usize::from(channels);
                    let mono: Vec<f64> = data
                        .chunks_exact(ch)
                        .map(|frame| {
                            frame.iter().map(|&s| f64::from(s)).sum::<f64>() / ch as f64
                        })
                        .collect();

                    if let Ok(mut prod) = producer_clone.lock() {
                        prod.write(&mono);
                    }
                },
                move |err| {
                    log::error!("audio capture stream error: {err}");
                    healthy_clone.store(false, Ordering::SeqCst);
                },
                None,
            )
            .map_err(|e| AudioError::BuildStream(e.to_string()))?;

        Ok(Self {
            stream,
            device_info,
            healthy,
        })
    }

    /// Start capturing audio
    pub fn start(&self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::PlayStream(e.to_string()))
    }

    /// Pause audio capture
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::PlayStream(e.to_string()))
    }

    /// False once the stream has reported a capture error; the driver
    /// loop should terminate the session rather than wait on a dead
    /// stream
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    /// Get device information
    pub fn device_info(&self) -> &AudioDeviceInfo {
        &self.device_info
    }
}

/// List available audio input devices
pub fn list_input_devices() -> Result<Vec<AudioDeviceInfo>, AudioError> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    let device_iter = host
        .input_devices()
        .map_err(|e| AudioError::DeviceName(e.to_string()))?;

    for device in device_iter {
        if let Ok(name) = device.name() {
            if let Ok(config) = device.default_input_config() {
                devices.push(AudioDeviceInfo {
                    name,
                    sample_rate: config.sample_rate().0,
                    channels: config.channels(),
                });
            }
        }
    }

    Ok(devices)
}
