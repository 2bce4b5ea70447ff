//! Stack trace capture for error-level lines

use backtrace::{Backtrace, BacktraceSymbol};

/// Symbol prefixes of frames belonging to the capture machinery itself
const INTERNAL_PREFIXES: &[&str] = &["backtrace::", "rust_chain_logger::core::"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    symbol: String,
    location: Option<String>,
}

impl Frame {
    fn from_symbol(symbol: &BacktraceSymbol) -> Self {
        let name = symbol
            .name()
            .map(|name| format!("{:#}", name))
            .unwrap_or_else(|| "<unknown>".to_string());
        let location = match (symbol.filename(), symbol.lineno()) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file.display(), line)),
            (Some(file), None) => Some(file.display().to_string()),
            _ => None,
        };
        Self {
            symbol: name,
            location,
        }
    }

    fn is_internal(&self) -> bool {
        INTERNAL_PREFIXES
            .iter()
            .any(|prefix| self.symbol.starts_with(prefix))
    }

    fn matches(&self, filter: &str) -> bool {
        self.symbol.contains(filter)
            || self
                .location
                .as_deref()
                .is_some_and(|location| location.contains(filter))
    }
}

/// Capture the current stack and render it as numbered frames
///
/// Logger frames at the top are always dropped, then `skip` more frames.
/// Frames whose symbol or location contains `filter` are left out.
/// Returns an empty string when nothing remains or symbols are unavailable.
pub fn capture(skip: usize, filter: &str) -> String {
    let trace = Backtrace::new();
    // Inlined calls resolve to several symbols for one frame
    let frames = trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols().iter().map(Frame::from_symbol))
        .collect();
    render(frames, skip, filter)
}

fn render(frames: Vec<Frame>, skip: usize, filter: &str) -> String {
    frames
        .into_iter()
        .skip_while(Frame::is_internal)
        .skip(skip)
        .filter(|frame| filter.is_empty() || !frame.matches(filter))
        .enumerate()
        .map(|(idx, frame)| match frame.location {
            Some(location) => format!("{}. {}\n    {}", idx + 1, frame.symbol, location),
            None => format!("{}. {}", idx + 1, frame.symbol),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
