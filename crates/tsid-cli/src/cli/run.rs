use anyhow::Context;
use std::{io::Write, thread::scope};
use tracing::{debug, info};
use tsid::{LockTsidGenerator, SystemClock, ThreadRandom, Tsid, TsidGenerator};

use crate::cli::{
    config::{DecodeConfig, Format, GenerateConfig},
    output::render,
};

/// Mints `config.count` identifiers and writes one per line.
///
/// A single thread writes each id as soon as it is minted. With more than
/// one thread, all threads share a single generator and the combined output
/// is sorted before it is written.
pub fn run_generate(config: &GenerateConfig, out: &mut impl Write) -> anyhow::Result<()> {
    info!(
        count = config.count,
        threads = config.threads,
        node = config.tsid.node(),
        node_bits = config.tsid.node_bits(),
        "generating ids"
    );

    let generator = LockTsidGenerator::from_config(config.tsid.into())?;
    let node_bits = config.tsid.node_bits();
    let epoch = config.tsid.epoch();

    if config.threads <= 1 {
        for _ in 0..config.count {
            let id = generator.try_next_id()?;
            writeln!(out, "{}", render(id, config.format, node_bits, epoch)?)?;
        }
    } else {
        for id in generate_threaded(&generator, config.count, config.threads)? {
            writeln!(out, "{}", render(id, config.format, node_bits, epoch)?)?;
        }
    }
    Ok(())
}

fn generate_threaded(
    generator: &LockTsidGenerator<SystemClock, ThreadRandom>,
    count: usize,
    threads: usize,
) -> anyhow::Result<Vec<Tsid>> {
    let per_thread = count / threads;
    let remainder = count % threads;

    let batches = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let n = per_thread + usize::from(i < remainder);
                s.spawn(move || {
                    debug!(thread = i, ids = n, "worker started");
                    generator.try_next_ids(n)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| anyhow::anyhow!("generator thread panicked"))?
                    .map_err(anyhow::Error::from)
            })
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    let mut ids: Vec<Tsid> = batches.into_iter().flatten().collect();
    ids.sort_unstable();
    Ok(ids)
}

/// Decodes each identifier and writes its fields as one JSON line.
pub fn run_decode(config: &DecodeConfig, out: &mut impl Write) -> anyhow::Result<()> {
    for s in &config.ids {
        let id = Tsid::decode(s).with_context(|| format!("invalid TSID {s:?}"))?;
        writeln!(
            out,
            "{}",
            render(id, Format::Json, config.node_bits, config.epoch)?
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, io};
    use tsid::{NODE_BITS_1024, TSID_EPOCH, TsidConfig};

    fn generate_config(count: usize, threads: usize, format: Format) -> GenerateConfig {
        GenerateConfig {
            tsid: TsidConfig::default()
                .with_node_bits(NODE_BITS_1024)
                .with_node(5)
                .validate()
                .unwrap(),
            count,
            format,
            threads,
        }
    }

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn generate_writes_sorted_unique_ids() {
        for threads in [1, 4] {
            let mut out = Vec::new();
            run_generate(&generate_config(1_000, threads, Format::Base32), &mut out).unwrap();

            let lines = lines(out);
            assert_eq!(lines.len(), 1_000);
            assert!(lines.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(lines.iter().collect::<HashSet<_>>().len(), 1_000);

            let ids: Vec<Tsid> = lines.iter().map(|l| l.parse().unwrap()).collect();
            assert!(ids.iter().all(|id| id.node(NODE_BITS_1024) == 5));
        }
    }

    /// Accepts a fixed number of lines, then fails every write.
    struct LineLimitedWriter {
        buf: Vec<u8>,
        max_lines: usize,
    }

    impl Write for LineLimitedWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if self.buf.iter().filter(|&&b| b == b'\n').count() >= self.max_lines {
                return Err(io::Error::other("output closed"));
            }
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn single_thread_streams_ids_as_minted() {
        // Buffering usize::MAX ids first would never reach the writer.
        let mut out = LineLimitedWriter {
            buf: Vec::new(),
            max_lines: 3,
        };
        let result = run_generate(&generate_config(usize::MAX, 1, Format::Number), &mut out);

        assert!(result.is_err());
        let lines = lines(out.buf);
        assert_eq!(lines.len(), 3);
        let ids: Vec<u64> = lines.iter().map(|l| l.parse().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generate_zero_ids_writes_nothing() {
        let mut out = Vec::new();
        run_generate(&generate_config(0, 1, Format::Number), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn decode_reports_fields() {
        let id = Tsid::from_components(42, 5, 6, NODE_BITS_1024);
        let config = DecodeConfig {
            ids: vec![id.encode()],
            node_bits: NODE_BITS_1024,
            epoch: TSID_EPOCH,
        };

        let mut out = Vec::new();
        run_decode(&config, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_str(&lines(out)[0]).unwrap();
        assert_eq!(value["time"], 42);
        assert_eq!(value["node"], 5);
        assert_eq!(value["counter"], 6);
    }

    #[test]
    fn decode_rejects_garbage() {
        let config = DecodeConfig {
            ids: vec!["not-a-tsid".to_owned()],
            node_bits: 0,
            epoch: TSID_EPOCH,
        };
        assert!(run_decode(&config, &mut Vec::new()).is_err());
    }
}
