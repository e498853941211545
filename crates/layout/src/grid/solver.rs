/// Distributes `available` points across columns given their natural widths.
///
/// When everything fits, columns grow proportionally to fill the width. When
/// it does not, columns whose natural width is within an equal share keep it
/// and the remaining space is split among the wider columns in proportion to
/// their natural widths. The result always sums to `available`.
pub fn resolve_widths(natural: &[f32], available: f32) -> Vec<f32> {
    let count = natural.len();
    if count == 0 {
        return Vec::new();
    }
    let available = available.max(0.0);
    let total: f32 = natural.iter().sum();

    if total <= 0.0 {
        return vec![available / count as f32; count];
    }

    if total <= available {
        let scale = available / total;
        return natural.iter().map(|w| w * scale).collect();
    }

    let fair_share = available / count as f32;
    let (narrow, wide): (Vec<usize>, Vec<usize>) =
        (0..count).partition(|&i| natural[i] <= fair_share);

    let narrow_total: f32 = narrow.iter().map(|&i| natural[i]).sum();
    let wide_total: f32 = wide.iter().map(|&i| natural[i]).sum();
    let remaining = available - narrow_total;

    log::debug!(
        "Grid overflows by {:.1}pt; {} narrow and {} wide columns share {:.1}pt",
        total - available,
        narrow.len(),
        wide.len(),
        remaining
    );

    let mut widths = natural.to_vec();
    for i in wide {
        widths[i] = remaining * natural[i] / wide_total;
    }
    widths
}
