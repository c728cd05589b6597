use navtrack::speech::{LogSynthesizer, SpeechQueue};
use navtrack::{Config, Detection, Navigator};

use serde_derive::Deserialize;
use std::io::BufRead;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct Record {
    ts: f64,
    dims: (u32, u32),
    detections: Vec<Detection>,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let in_file_name = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("expected detections file name"))?;

    let config = match args.next() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let speech = SpeechQueue::new(LogSynthesizer, config.speech.queue_size);
    let mut nav = Navigator::new(&config, speech);

    let reader = std::io::BufReader::new(std::fs::File::open(in_file_name)?);

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: Record = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(err) => {
                eprintln!("line {}: wrong file format: {}", lineno + 1, err);
                continue;
            }
        };

        let reports = nav.process(record.dims, record.detections, record.ts);

        for r in reports {
            println!(
                "{} {} {} {} {} {}",
                record.ts, r.track_id, r.class, r.center.0, r.center.1, r.direction
            );
        }
    }

    println!("{}", nav.whats_ahead());

    Ok(())
}
