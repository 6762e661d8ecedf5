//! Synthetic series used as per-series fallback and in offline demo mode.
//!
//! Structure is fixed (lengths, field set, timestamp spacing); values come
//! from the injected RNG so a seeded RNG reproduces them exactly.

use std::collections::BTreeMap;

use fastrand::Rng;
use time::Duration;

use crate::{
    Allocation, CryptoPoint, CryptoSeries, EconomicIndicators, ForexPair, ForexPoint, ForexSeries,
    IndexLevel, Indicator, MarketOverview, Portfolio, StockPoint, StockSeries, Symbol, UtcDateTime,
};

pub const STOCK_POINTS: usize = 30;
pub const CRYPTO_POINTS: usize = 24;
pub const FOREX_POINTS: usize = 30;

const STOCK_BASE: f64 = 150.0;
const STOCK_SPREAD: f64 = 50.0;
const STOCK_DRIFT: f64 = 0.5;

const CRYPTO_BASE: f64 = 45_000.0;
const CRYPTO_SPREAD: f64 = 5_000.0;
const CRYPTO_DRIFT: f64 = 50.0;

const FOREX_BASE: f64 = 1.10;
const FOREX_SPREAD: f64 = 0.05;

/// 30 daily closes ending today: `150 + r*50 + i*0.5`.
pub fn stock_series(symbol: &Symbol, rng: &mut Rng, now: UtcDateTime) -> StockSeries {
    let today = now.into_inner().date();
    let data = (0..STOCK_POINTS)
        .map(|index| {
            let days_back = (STOCK_POINTS - 1 - index) as i64;
            let close = noisy_value(rng, STOCK_BASE, STOCK_SPREAD, STOCK_DRIFT, index);
            StockPoint::close_only(today.saturating_sub(Duration::days(days_back)), close)
        })
        .collect::<Vec<_>>();

    let (current_price, change, change_percent) =
        trailing_change(data.iter().map(|point| point.close));

    StockSeries {
        symbol: symbol.to_string(),
        data,
        current_price,
        change,
        change_percent,
    }
}

/// 24 hourly prices ending now: `45000 + r*5000 + i*50`.
pub fn crypto_series(symbol: &Symbol, rng: &mut Rng, now: UtcDateTime) -> CryptoSeries {
    let now = now.into_inner();
    let data = (0..CRYPTO_POINTS)
        .map(|index| {
            let hours_back = (CRYPTO_POINTS - 1 - index) as i64;
            CryptoPoint {
                timestamp: UtcDateTime::from_offset_datetime(
                    now.saturating_sub(Duration::hours(hours_back)),
                ),
                price: noisy_value(rng, CRYPTO_BASE, CRYPTO_SPREAD, CRYPTO_DRIFT, index),
                volume: None,
                market_cap: None,
            }
        })
        .collect::<Vec<_>>();

    let (current_price, change, change_percent) =
        trailing_change(data.iter().map(|point| point.price));

    CryptoSeries {
        symbol: symbol.to_string(),
        data,
        current_price,
        change,
        change_percent,
    }
}

/// 30 daily rates ending today: `1.10 + r*0.05`, no drift.
pub fn forex_series(pair: &ForexPair, rng: &mut Rng, now: UtcDateTime) -> ForexSeries {
    let today = now.into_inner().date();
    let data = (0..FOREX_POINTS)
        .map(|index| {
            let days_back = (FOREX_POINTS - 1 - index) as i64;
            ForexPoint {
                date: today.saturating_sub(Duration::days(days_back)),
                rate: noisy_value(rng, FOREX_BASE, FOREX_SPREAD, 0.0, index),
                bid: None,
                ask: None,
            }
        })
        .collect::<Vec<_>>();

    let current_rate = data.last().map(|point| point.rate).unwrap_or(FOREX_BASE);

    ForexSeries {
        pair: pair.to_string(),
        data,
        current_rate,
    }
}

pub fn portfolio() -> Portfolio {
    let slices = [
        ("Stocks", 50_000.0, 45.0),
        ("Bonds", 25_000.0, 22.0),
        ("Real Estate", 20_000.0, 18.0),
        ("Crypto", 10_000.0, 9.0),
        ("Cash", 6_000.0, 6.0),
    ];

    Portfolio(
        slices
            .into_iter()
            .map(|(asset, value, percentage)| Allocation {
                asset: String::from(asset),
                value,
                percentage,
            })
            .collect(),
    )
}

pub fn economic_indicators() -> EconomicIndicators {
    let indicator = |value: f64, change: f64, period: &str| Indicator {
        value,
        change,
        period: String::from(period),
        unit: None,
    };

    EconomicIndicators {
        gdp: indicator(23_500.0, 2.3, "Q3 2024"),
        unemployment: indicator(3.8, -0.2, "Sep 2024"),
        inflation: indicator(3.2, -0.5, "Sep 2024"),
        interest_rate: indicator(5.25, 0.0, "Oct 2024"),
    }
}

pub fn market_overview() -> MarketOverview {
    let indices = [
        ("SP500", 4_523.45, 1.2),
        ("DOW", 35_234.56, 0.8),
        ("NASDAQ", 14_123.78, 1.5),
    ]
    .into_iter()
    .map(|(name, value, change)| (String::from(name), IndexLevel { value, change }))
    .collect::<BTreeMap<_, _>>();

    MarketOverview {
        indices,
        top_gainers: Vec::new(),
        top_losers: Vec::new(),
        timestamp: None,
    }
}

fn noisy_value(rng: &mut Rng, base: f64, spread: f64, drift: f64, index: usize) -> f64 {
    base + rng.f64() * spread + index as f64 * drift
}

/// `(last, last - previous, percent change)` over the final two values.
fn trailing_change(values: impl DoubleEndedIterator<Item = f64>) -> (f64, f64, f64) {
    let mut tail = values.rev();
    let Some(last) = tail.next() else {
        return (0.0, 0.0, 0.0);
    };
    let Some(previous) = tail.next() else {
        return (last, 0.0, 0.0);
    };

    let change = last - previous;
    let percent = if previous == 0.0 {
        0.0
    } else {
        change * 100.0 / previous
    };
    (last, change, percent)
}
