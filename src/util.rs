pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        n => Some(data.iter().sum::<f64>() / n as f64),
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;
    Some(variance.sqrt())
}
