//! Review text coercion and normalization.
//!
//! Reviews arrive from forms, imports and database rows, so the classifier
//! accepts anything that can be turned into text. [`ReviewInput`] captures
//! that coercion, including the "null" case and the falsy test used when
//! batches skip blank entries.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// Everything outside ASCII letters, digits and whitespace is dropped.
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());

/// A value that can be classified as review text.
pub trait ReviewInput {
    /// String form of the value, or `None` for a null.
    fn review_text(&self) -> Option<Cow<'_, str>>;

    /// True when a batch should skip this entry: null, falsy, or only whitespace.
    fn is_blank(&self) -> bool {
        self.review_text().map_or(true, |text| text.trim().is_empty())
    }
}

impl ReviewInput for str {
    fn review_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ReviewInput for String {
    fn review_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl ReviewInput for Cow<'_, str> {
    fn review_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_ref()))
    }
}

impl<T: ReviewInput + ?Sized> ReviewInput for &T {
    fn review_text(&self) -> Option<Cow<'_, str>> {
        (**self).review_text()
    }

    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: ReviewInput> ReviewInput for Option<T> {
    fn review_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|value| value.review_text())
    }

    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, |value| value.is_blank())
    }
}

impl ReviewInput for bool {
    fn review_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(if *self { "True" } else { "False" }))
    }

    fn is_blank(&self) -> bool {
        !*self
    }
}

macro_rules! numeric_review_input {
    ($($ty:ty),*) => {
        $(
            impl ReviewInput for $ty {
                fn review_text(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }

                // zero is falsy
                fn is_blank(&self) -> bool {
                    *self == (0 as $ty)
                }
            }
        )*
    };
}

numeric_review_input!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Owned string form of any review input; nulls become the empty string.
pub fn coerce<T: ReviewInput + ?Sized>(input: &T) -> String {
    input
        .review_text()
        .map(Cow::into_owned)
        .unwrap_or_default()
}

/// Lower-case the text, strip everything but ASCII letters, digits and
/// whitespace, then collapse whitespace runs to single spaces.
///
/// Total over all inputs: a null or empty value yields `""`.
pub fn normalize<T: ReviewInput + ?Sized>(input: &T) -> String {
    let Some(text) = input.review_text() else {
        return String::new();
    };

    let lowered = text.to_lowercase();
    let stripped = NON_ALNUM.replace_all(&lowered, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
