//! Line-oriented wire format shared by stdin/stdout and worker channels.
//!
//! ```text
//! <float> <float>\n
//! <float> <float>\n
//! ...
//! EOF
//! ```
//!
//! There is no header or count: the reader knows the batch is complete when
//! the writer shuts its side down.

mod codec;

pub use codec::{encode_points, format_point, parse_line, read_points, write_points};
