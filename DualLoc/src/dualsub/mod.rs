//! Dual-subtitle merging
//!
//! Combines two localized string tables into one bilingual table. Subtitle
//! values are paginated with display-time-span tags:
//!
//! ```text
//! <name=Peter><ts=&quot;0.0;1.5&quot;>First page<ts=&quot;1.5;3.2&quot;>Second page
//! ```
//!
//! Each tag opens a page that is shown from `start` to `end` seconds. The two
//! tracks may paginate the same line differently, so before the page texts
//! are joined with `<br>`, the track with more pages has adjacent pages folded
//! together until both sides have the same count.

mod align;
mod merge;
mod page;

pub use align::{join_candidates, join_pages};
pub use merge::{filter_subtitles, is_subtitle_key, merge_tables, merge_value};
pub use page::{LINE_BREAK, NAME_TAG_PREFIX, Page, PagedText, TS_TAG_OPEN, TimeSpan};
