use serde::{Deserialize, Serialize};

use crate::core::ScriptEntry;

/// An immutable playback script
///
/// Seed lines are visible as soon as a session starts; entries are delivered
/// after their delay. Entries are expected in non-decreasing delay order but
/// this is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    seed: Vec<String>,
    #[serde(default)]
    entries: Vec<ScriptEntry>,
}

impl Script {
    pub fn new(seed: Vec<String>, entries: Vec<ScriptEntry>) -> Self {
        Self { seed, entries }
    }

    /// The script shown on the landing page
    pub fn landing() -> Self {
        let seed = [
            "$ tesser-cli live run --strategy-config research/strategies/sma_cross.toml --exec paper",
            "[INFO] loaded strategy SmaCross (fast=5, slow=20) for BTCUSDT",
            "[INFO] connecting to wss://stream.bybit.com/v5/public/linear",
        ];
        let entries = [
            ("[INFO] subscribed kline.1m.BTCUSDT orderbook.50.BTCUSDT", 800),
            ("[INFO] warmup complete: 20 candles buffered", 1600),
            ("[SIGNAL] SmaCross: fast 64212.4 crossed above slow 64180.9", 2400),
            ("[EXEC] submit BUY 0.010 BTCUSDT MARKET client_id=sma-0001", 3000),
            ("[FILLED] BUY 0.010 BTCUSDT @ 64215.0 fee 0.38 USDT", 4500),
            ("[WARN] drawdown 1.2% approaching risk limit 3.0%", 6000),
            ("[EXEC] submit SELL 0.010 BTCUSDT LIMIT 64480.0 client_id=sma-0002", 7500),
            ("[FILLED] SELL 0.010 BTCUSDT @ 64480.0 realized pnl +2.65 USDT", 8200),
        ];

        Self {
            seed: seed.iter().map(|s| s.to_string()).collect(),
            entries: entries
                .iter()
                .map(|(text, delay)| ScriptEntry::new(*text, *delay))
                .collect(),
        }
    }

    /// Lines shown before playback begins
    pub fn seed(&self) -> &[String] {
        &self.seed
    }

    /// Scheduled entries in authored order
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptEntry> {
        self.entries.iter()
    }

    /// Number of scheduled entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seed.is_empty() && self.entries.is_empty()
    }

    /// Seed plus scheduled lines
    pub fn total_lines(&self) -> usize {
        self.seed.len() + self.entries.len()
    }

    /// Whether delays are listed in non-decreasing order
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].delay_ms <= w[1].delay_ms)
    }

    /// Offset of the last delivery
    pub fn duration_ms(&self) -> u64 {
        self.entries.iter().map(|e| e.delay_ms).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a ScriptEntry;
    type IntoIter = std::slice::Iter<'a, ScriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
