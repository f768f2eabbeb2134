//! Live terminal spectrum visualizer
//!
//! Capture -> sliding window -> projection analysis -> bar row, one
//! strict sequence per capture chunk. The blocking ring-buffer read is
//! the only pacing point; if analysis falls behind, the capture queue
//! drops the overflow.

use chroma_scope::audio::input::{list_input_devices, AudioError};
use chroma_scope::{
    AnalyzerConfig, AudioInput, CaptureRingBuffer, DbRange, OctaveDivisions, SlidingWindow,
    SpectrumAnalyzer,
};
use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::time::{Duration, Instant};

const BAR_GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Parser, Debug)]
#[command(name = "chroma-live", about = "Live musical spectrum visualizer")]
struct Args {
    /// Frequency of the lowest bin in Hz
    #[arg(long, default_value_t = 52.5)]
    base_frequency: f64,

    /// Number of frequency bins
    #[arg(long, default_value_t = 60)]
    bins: usize,

    /// Quarter-tone bin spacing (24 per octave) instead of semitones
    #[arg(long)]
    quarter_tone: bool,

    /// Sample rate in Hz; the input device must match
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// Analysis window length in samples
    #[arg(long, default_value_t = 1024)]
    window: usize,

    /// Capture chunk size in samples (one display refresh per chunk)
    #[arg(long, default_value_t = 256)]
    chunk: usize,

    /// Decibel level shown as an empty bar
    #[arg(long, default_value_t = -55.0)]
    min_db: f64,

    /// Decibel level shown as a full bar
    #[arg(long, default_value_t = -5.0)]
    max_db: f64,

    /// Skip capture: analyze one synthesized cosine at this frequency
    /// (Hz) and print per-bin magnitudes
    #[arg(long)]
    probe: Option<f64>,

    /// List audio input devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.list_devices {
        for device in list_input_devices()? {
            println!(
                "{} ({} Hz, {} ch)",
                device.name, device.sample_rate, device.channels
            );
        }
        return Ok(());
    }

    let config = AnalyzerConfig {
        base_frequency: args.base_frequency,
        num_bins: args.bins,
        divisions: if args.quarter_tone {
            OctaveDivisions::QuarterTone
        } else {
            OctaveDivisions::Semitone
        },
        sample_rate: f64::from(args.sample_rate),
        window_len: args.window,
    };
    let analyzer = SpectrumAnalyzer::new(config)?;

    if let Some(freq) = args.probe {
        probe(&analyzer, freq);
        return Ok(());
    }

    let range = DbRange {
        min_db: args.min_db,
        max_db: args.max_db,
    };

    run_live(&analyzer, range, args.sample_rate, args.chunk)?;

    Ok(())
}

/// Analyze one synthesized cosine and dump the full amplitude vector
fn probe(analyzer: &SpectrumAnalyzer, freq: f64) {
    let sample_rate = analyzer.config().sample_rate;
    let signal: Vec<f64> = (0..analyzer.window_len())
        .map(|t| (2.0 * std::f64::consts::PI * freq * t as f64 / sample_rate).cos())
        .collect();

    let start = Instant::now();
    let db = analyzer.estimate_amplitudes(&signal);
    let elapsed = start.elapsed();

    for (f, v) in analyzer.frequencies().iter().zip(&db) {
        println!("frequency component {f:8.1} Hz magnitude: {v:9.4} dB");
    }
    println!("---");
    println!("  transform time: {:.3} ms", elapsed.as_secs_f64() * 1e3);
}

fn run_live(
    analyzer: &SpectrumAnalyzer,
    range: DbRange,
    sample_rate: u32,
    chunk_len: usize,
) -> Result<(), Box<dyn Error>> {
    // Two seconds of headroom for the capture queue
    let rb = CaptureRingBuffer::new(sample_rate as usize * 2);
    let (producer, mut consumer) = rb.split();

    let input = AudioInput::from_default_device(producer, sample_rate)?;
    log::info!(
        "capturing from {} at {} Hz",
        input.device_info().name,
        input.device_info().sample_rate
    );
    input.start()?;

    let mut window = SlidingWindow::new(analyzer.window_len());
    let mut chunk = vec![0.0; chunk_len];
    let mut decibels = vec![0.0; analyzer.num_bins()];
    let mut heights = vec![0.0; analyzer.num_bins()];
    let mut line = String::with_capacity(analyzer.num_bins() * 4 + 8);
    let stdout = std::io::stdout();

    loop {
        // Blocking read of one full chunk, watching for stream death
        let mut filled = 0;
        while filled < chunk.len() {
            if !input.is_healthy() {
                return Err(Box::new(AudioError::StreamFailed));
            }
            let n = consumer.read(&mut chunk[filled..]);
            filled += n;
            if n == 0 {
                std::thread::sleep(Duration::from_micros(100));
            }
        }

        window.push(&chunk);
        analyzer.estimate_into(window.samples(), &mut decibels);
        range.heights_into(&decibels, &mut heights);

        line.clear();
        line.push('\r');
        for &h in &heights {
            let level = (h * (BAR_GLYPHS.len() - 1) as f64).round() as usize;
            line.push(BAR_GLYPHS[level.min(BAR_GLYPHS.len() - 1)]);
        }

        let mut out = stdout.lock();
        out.write_all(line.as_bytes())?;
        out.flush()?;
    }
}
