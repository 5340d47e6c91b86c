/// Digits and capital letters used on plates; `I` and `O` are never issued.
pub const ALNUM: &str = "0123456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Province abbreviations, in model output order.
pub const PROVINCES: [&str; 31] = [
    "川", "鄂", "赣", "甘", "贵", "桂", "黑", "沪", "冀", "津", "京", "吉", "辽", "鲁", "蒙", "闽",
    "宁", "青", "琼", "陕", "苏", "晋", "皖", "湘", "新", "豫", "渝", "粤", "云", "藏", "浙",
];

/// Ordered class labels of a character model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    labels: Vec<String>,
}

impl Alphabet {
    pub fn alnum() -> Self {
        Self {
            labels: ALNUM.chars().map(String::from).collect(),
        }
    }

    pub fn provinces() -> Self {
        Self::from_labels(PROVINCES)
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}
