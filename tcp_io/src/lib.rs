//! Line-delimited json framing: every message is one json object followed
//! by a newline. Works over anything that reads and writes bytes, which in
//! practice means a `TcpStream` (or a cursor in tests).

use serde::{de::DeserializeOwned, Serialize};
use std::io::{self, BufRead, Read, Write};

/// Longest line `deserialize_from` accepts, newline included. A peer that
/// streams more than this without a newline is treated as broken.
pub const MAX_LINE: u64 = 1 << 20;

pub fn serialize_into<W, T: ?Sized>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()
}

pub fn deserialize_from<R, T>(mut reader: R) -> io::Result<T>
where
    R: BufRead,
    T: DeserializeOwned,
{
    let mut line = String::new();
    let read = reader.by_ref().take(MAX_LINE).read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "peer closed the connection",
        ));
    }
    if read as u64 == MAX_LINE && !line.ends_with('\n') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message exceeds {MAX_LINE} bytes"),
        ));
    }
    Ok(serde_json::from_str(line.trim_end())?)
}
