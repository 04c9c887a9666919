use serde_json::Value;
use crate::models::{FlatRow, PairRecord};

static NULL: Value = Value::Null;

/// Flattens one DexScreener pair into a table row. Never fails: anything
/// missing, null or unparseable becomes `None` or zero.
pub fn flatten(pair: &PairRecord) -> FlatRow {
    let raw = pair.raw();
    let base_token = field(raw, "baseToken");
    let quote_token = field(raw, "quoteToken");
    let liquidity = field(raw, "liquidity");
    let volume = field(raw, "volume");

    let txns = field(raw, "txns");
    let tx_24h = field(txns, "h24");
    let tx_6h = field(txns, "h6");
    let tx_1h = field(txns, "h1");

    FlatRow {
        pair_address: text(raw, "pairAddress"),
        dex: text(raw, "dexId"),
        chain: text(raw, "chainId"),

        token0_symbol: text(base_token, "symbol"),
        token0_address: text(base_token, "address"),
        token1_symbol: text(quote_token, "symbol"),
        token1_address: text(quote_token, "address"),

        price_usd: number(field(raw, "priceUsd")),

        liquidity_usd: number(field(liquidity, "usd")),
        liquidity_token0: number(field(liquidity, "base")),
        liquidity_token1: number(field(liquidity, "quote")),

        volume_24h_usd: number(field(volume, "h24")),
        volume_6h_usd: number(field(volume, "h6")),
        volume_1h_usd: number(field(volume, "h1")),

        tx_24h_count: tx_count(tx_24h),
        tx_6h_count: tx_count(tx_6h),
        tx_1h_count: tx_count(tx_1h),

        tx_24h_buys: whole(number(field(tx_24h, "buys"))),
        tx_24h_sells: whole(number(field(tx_24h, "sells"))),
    }
}

/// Some API versions report `count` per window, others only `buys`/`sells`.
/// A present `count` wins unless it is null, `0`, `false` or `""`; a
/// string `"0"` still counts as present.
fn tx_count(window: &Value) -> u64 {
    let count = field(window, "count");
    if truthy(count) {
        return whole(number(count));
    }
    whole(number(field(window, "buys")) + number(field(window, "sells")))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&NULL)
}

fn text(value: &Value, key: &str) -> Option<String> {
    field(value, key).as_str().map(str::to_string)
}

/// JSON numbers and numeric strings; everything else is zero.
fn number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Truncates toward zero; negatives clamp to zero.
fn whole(n: f64) -> u64 {
    n as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(raw: Value) -> FlatRow {
        flatten(&PairRecord::new(raw))
    }

    #[test]
    fn empty_pair_flattens_to_zeroes() {
        assert_eq!(row(json!({})), FlatRow::default());
    }

    #[test]
    fn non_object_pair_flattens_to_zeroes() {
        assert_eq!(row(json!(null)), FlatRow::default());
        assert_eq!(row(json!([1, 2, 3])), FlatRow::default());
    }

    #[test]
    fn full_pair() {
        let flat = row(json!({
            "chainId": "base",
            "dexId": "aerodrome",
            "pairAddress": "0xcDAC0d6c6C59727a65F871236188350531885C43",
            "baseToken": { "address": "0x4200000000000000000000000000000000000006", "symbol": "WETH" },
            "quoteToken": { "address": "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913", "symbol": "USDC" },
            "priceUsd": "3120.55",
            "liquidity": { "usd": 1500000.5, "base": 240.25, "quote": 750000 },
            "volume": { "h24": 980000.0, "h6": 210000.0, "h1": 35000.0 },
            "txns": {
                "h24": { "buys": 1200, "sells": 1100 },
                "h6": { "buys": 300, "sells": 280 },
                "h1": { "buys": 40, "sells": 45 }
            }
        }));

        assert_eq!(flat.pair_address.as_deref(), Some("0xcDAC0d6c6C59727a65F871236188350531885C43"));
        assert_eq!(flat.dex.as_deref(), Some("aerodrome"));
        assert_eq!(flat.chain.as_deref(), Some("base"));
        assert_eq!(flat.pair_label(), "WETH/USDC");
        assert_eq!(flat.token1_address.as_deref(), Some("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"));
        assert_eq!(flat.price_usd, 3120.55);
        assert_eq!(flat.liquidity_usd, 1500000.5);
        assert_eq!(flat.liquidity_token0, 240.25);
        assert_eq!(flat.liquidity_token1, 750000.0);
        assert_eq!(flat.volume_24h_usd, 980000.0);
        assert_eq!(flat.volume_6h_usd, 210000.0);
        assert_eq!(flat.volume_1h_usd, 35000.0);
        assert_eq!(flat.tx_24h_count, 2300);
        assert_eq!(flat.tx_6h_count, 580);
        assert_eq!(flat.tx_1h_count, 85);
        assert_eq!(flat.tx_24h_buys, 1200);
        assert_eq!(flat.tx_24h_sells, 1100);
    }

    #[test]
    fn tx_count_falls_back_to_buys_plus_sells() {
        let flat = row(json!({ "txns": { "h24": { "buys": 3, "sells": 5 } } }));
        assert_eq!(flat.tx_24h_count, 8);
    }

    #[test]
    fn explicit_tx_count_takes_precedence() {
        let flat = row(json!({ "txns": { "h24": { "count": 10, "buys": 3, "sells": 5 } } }));
        assert_eq!(flat.tx_24h_count, 10);
        assert_eq!(flat.tx_24h_buys, 3);
        assert_eq!(flat.tx_24h_sells, 5);
    }

    #[test]
    fn zero_or_null_count_uses_fallback() {
        let zero = row(json!({ "txns": { "h6": { "count": 0, "buys": 2, "sells": 2 } } }));
        assert_eq!(zero.tx_6h_count, 4);

        let null = row(json!({ "txns": { "h1": { "count": null, "buys": 1, "sells": null } } }));
        assert_eq!(null.tx_1h_count, 1);
    }

    #[test]
    fn string_count_is_used_even_when_zero() {
        let zero = row(json!({ "txns": { "h24": { "count": "0", "buys": 3, "sells": 5 } } }));
        assert_eq!(zero.tx_24h_count, 0);

        let twelve = row(json!({ "txns": { "h24": { "count": "12", "buys": 3, "sells": 5 } } }));
        assert_eq!(twelve.tx_24h_count, 12);

        let empty = row(json!({ "txns": { "h24": { "count": "", "buys": 3, "sells": 5 } } }));
        assert_eq!(empty.tx_24h_count, 8);
    }

    #[test]
    fn huge_count_clamps_instead_of_wrapping() {
        let flat = row(json!({ "txns": { "h24": { "count": 1e20 } } }));
        assert_eq!(flat.tx_24h_count, u64::MAX);
    }

    #[test]
    fn null_sub_objects_are_treated_as_empty() {
        let flat = row(json!({
            "pairAddress": "0xabc",
            "baseToken": null,
            "quoteToken": { "symbol": null },
            "liquidity": null,
            "volume": { "h24": null },
            "txns": { "h24": null },
            "priceUsd": null
        }));
        assert_eq!(flat.pair_address.as_deref(), Some("0xabc"));
        assert_eq!(flat.token0_symbol, None);
        assert_eq!(flat.token1_symbol, None);
        assert_eq!(flat.pair_label(), "?/?");
        assert_eq!(flat.liquidity_usd, 0.0);
        assert_eq!(flat.volume_24h_usd, 0.0);
        assert_eq!(flat.tx_24h_count, 0);
        assert_eq!(flat.price_usd, 0.0);
    }

    #[test]
    fn numeric_strings_and_garbage() {
        let flat = row(json!({
            "priceUsd": "not-a-price",
            "liquidity": { "usd": "1234.5", "base": "NaN", "quote": -3 },
            "txns": { "h24": { "buys": "7", "sells": 2.9 } }
        }));
        assert_eq!(flat.price_usd, 0.0);
        assert_eq!(flat.liquidity_usd, 1234.5);
        assert_eq!(flat.liquidity_token0, 0.0);
        assert_eq!(flat.liquidity_token1, -3.0);
        assert_eq!(flat.tx_24h_count, 9);
        assert_eq!(flat.tx_24h_sells, 2);
    }

    #[test]
    fn flatten_is_idempotent() {
        let pair = PairRecord::new(json!({ "liquidity": { "usd": 5 }, "txns": { "h24": { "count": 4 } } }));
        assert_eq!(flatten(&pair), flatten(&pair));
    }
}
