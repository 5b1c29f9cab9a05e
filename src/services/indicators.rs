/// Trailing moving average with the window clipped at the start of the
/// series: `out[i]` is the mean of `values[max(0, i - window + 1) ..= i]`,
/// so early points average over however many values exist. Output length
/// equals input length.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0_f64;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let span = (i + 1).min(window);
        out.push(sum / span as f64);
    }

    out
}
