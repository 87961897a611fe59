//! 乱数ソースの抽象化モジュール
//! 盤面の初期配置で使う乱数を呼び出し側から注入できるようにし、
//! テストやシード指定での再現性を確保する。

use rand::{rngs::StdRng, Rng, SeedableRng};

/// 範囲指定の一様整数を供給する乱数ソース
pub trait RandomSource {
    /// [0, upper) の一様乱数を返す。upper は1以上であること
    fn next_in_range(&mut self, upper: usize) -> usize;
}

/// randの`StdRng`をベースにした標準の乱数ソース
#[derive(Debug, Clone)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    /// OSのエントロピーから初期化する
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 固定シードで初期化する（同じシードなら同じ系列）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn next_in_range(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// 事前に与えた値を順番に返す乱数ソース
/// 値は`upper`で剰余をとって範囲内に収め、末尾まで使ったら先頭に戻る
///
/// 事前配置に使う場合、台本は空きのある列をいずれ指さなければならない。
/// 指す列がすべて埋まると配置ループは終わらない。
#[derive(Debug, Clone)]
pub struct ScriptedRandomSource {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandomSource {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// これまでに消費した値の数
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next_in_range(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}
