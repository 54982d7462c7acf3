/// 算術平均を返す。空の場合は0を返す。
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// 合計を返す。
pub fn total(values: &[i64]) -> i64 {
    values.iter().sum()
}
