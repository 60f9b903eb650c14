// Axis-pair listing for scatter plots: every unordered pair of axes, in axis
// order, numbered from 1.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisPair {
    pub index: usize,
    pub horizontal: String,
    pub vertical: String,
}

pub fn axis_combinations(axes: &[String]) -> Vec<AxisPair> {
    let mut pairs = Vec::new();
    for (i, horizontal) in axes.iter().enumerate() {
        for vertical in &axes[i + 1..] {
            pairs.push(AxisPair {
                index: pairs.len() + 1,
                horizontal: horizontal.clone(),
                vertical: vertical.clone(),
            });
        }
    }
    pairs
}
