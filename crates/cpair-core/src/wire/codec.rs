//! Encoding and decoding of point batches.

use crate::config::WireConfig;
use crate::error::{CpairError, Result};
use crate::geometry::Point;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

/// Parse one line into a point.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_line(line_number: usize, line: &str) -> Result<Point> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != WireConfig::TOKENS_PER_LINE {
        return Err(CpairError::malformed(
            line_number,
            line,
            format!(
                "expected {} tokens, found {}",
                WireConfig::TOKENS_PER_LINE,
                tokens.len()
            ),
        ));
    }

    let parse = |token: &str| {
        token.parse::<f32>().map_err(|_| {
            CpairError::malformed(line_number, line, format!("{token:?} is not a float"))
        })
    };

    Ok(Point::new(parse(tokens[0])?, parse(tokens[1])?))
}

/// Read every line from `reader` until end-of-stream.
///
/// Stops at the first malformed line. An empty stream yields an empty set.
pub async fn read_points<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<Point>> {
    let mut lines = BufReader::new(reader).lines();
    let mut points = Vec::new();
    let mut line_number = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Err(CpairError::malformed(
                    line_number + 1,
                    "",
                    "line is not valid UTF-8",
                ));
            }
            Err(e) => return Err(CpairError::io("reading points", e)),
        };
        line_number += 1;
        points.push(parse_line(line_number, &line)?);
    }

    trace!(count = points.len(), "read point batch");
    Ok(points)
}

/// Format a point the way it travels on the wire, without the newline.
pub fn format_point(point: &Point) -> String {
    format!(
        "{:.prec$}{}{:.prec$}",
        point.x,
        WireConfig::SEPARATOR,
        point.y,
        prec = WireConfig::DECIMAL_PLACES
    )
}

/// Encode a batch into its complete wire text.
pub fn encode_points(points: &[Point]) -> String {
    let mut out = String::new();
    for point in points {
        out.push_str(&format_point(point));
        out.push('\n');
    }
    out
}

/// Write `points` one line at a time, flushing after every line, then shut
/// down the write direction so the peer sees end-of-stream.
pub async fn write_points<W: AsyncWrite + Unpin>(writer: &mut W, points: &[Point]) -> Result<()> {
    for point in points {
        let mut line = format_point(point);
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| CpairError::io("writing point", e))?;
        writer
            .flush()
            .await
            .map_err(|e| CpairError::io("flushing point", e))?;
    }
    writer
        .shutdown()
        .await
        .map_err(|e| CpairError::io("closing channel", e))?;

    trace!(count = points.len(), "wrote point batch");
    Ok(())
}
