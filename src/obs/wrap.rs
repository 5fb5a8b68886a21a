//! Instrumentos globais das operações do pool (no-op sem meter provider instalado).
use once_cell::sync::OnceCell;
use opentelemetry::metrics::Histogram;
use opentelemetry::{global, KeyValue};
use std::time::Instant;

use crate::amm::types::{Amount, U256};

static OP_LATENCY: OnceCell<Histogram<f64>> = OnceCell::new();
static INVARIANT_GROWTH: OnceCell<Histogram<f64>> = OnceCell::new();

fn op_latency() -> &'static Histogram<f64> {
    OP_LATENCY.get_or_init(|| {
        global::meter("swap_pool_core")
            .f64_histogram("pool_op_latency_ms")
            .with_unit("ms")
            .with_description("Latency of pool operations in ms")
            .build()
    })
}

fn invariant_growth() -> &'static Histogram<f64> {
    INVARIANT_GROWTH.get_or_init(|| {
        global::meter("swap_pool_core")
            .f64_histogram("invariant_growth_rel")
            .with_unit("1")
            .with_description("Relative growth of reserve_in * reserve_out per swap")
            .build()
    })
}

/// Executa `f` e registra a duração com o rótulo `op`.
pub fn time<F, T>(op: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let out = f();
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    op_latency().record(ms, &[KeyValue::new("op", op)]);
    out
}

/// Crescimento relativo `(k1 - k0) / k0` do produto das reservas.
pub fn relative_growth(before: (Amount, Amount), after: (Amount, Amount)) -> f64 {
    let k0 = U256::from(before.0) * U256::from(before.1);
    let k1 = U256::from(after.0) * U256::from(after.1);
    if k0.is_zero() || k1 <= k0 {
        return 0.0;
    }
    // precisão de f64 basta para telemetria
    let to_f64 = |v: U256| v.to_string().parse::<f64>().unwrap_or(f64::MAX);
    to_f64(k1 - k0) / to_f64(k0)
}

pub fn record_invariant_growth(before: (Amount, Amount), after: (Amount, Amount)) {
    invariant_growth().record(relative_growth(before, after), &[KeyValue::new("op", "swap")]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_time_passes_value_through() {
        assert_eq!(time("noop", || 41 + 1), 42);
    }

    #[test]
    fn t_relative_growth() {
        assert_eq!(relative_growth((100, 100), (100, 100)), 0.0);
        let g = relative_growth((100, 100), (110, 91));
        assert!((g - 0.001).abs() < 1e-12, "g={g}");
    }
}
