//! Frame header example — builds and parses a small type/channel/length frame.
//!
//! Run with:
//!   cargo run --example frame-header

use wirebuf::{Buffer, BufferOverflow};

const FRAME_METHOD: u8 = 1;
const FRAME_END: u8 = 0xCE;

#[derive(Debug)]
struct Frame {
    kind: u8,
    channel: u16,
    payload: Vec<u8>,
}

fn write_frame(out: &mut Buffer, frame: &Frame) {
    let mut body = Buffer::new();
    body.append_string(&frame.payload);

    out.append_u8(frame.kind);
    out.append_u16(frame.channel);
    out.append_u32(body.size() as u32);
    out.merge(&body);
    out.append_u8(FRAME_END);
}

/// Returns `Ok(None)` until a whole frame is buffered.
fn read_frame(buf: &mut Buffer) -> Result<Option<Frame>, BufferOverflow> {
    if buf.size() < 7 {
        return Ok(None);
    }
    let size = buf.read_u32(3)? as usize;
    if buf.size() < 7 + size + 1 {
        return Ok(None);
    }

    let kind = buf.consume_u8()?;
    let channel = buf.consume_u16()?;
    buf.discard(4)?;
    let payload = buf.shift(size)?.flush().to_vec();
    if buf.consume_u8()? != FRAME_END {
        eprintln!("warning: missing frame end marker");
    }

    Ok(Some(Frame {
        kind,
        channel,
        payload,
    }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut wire = Buffer::new();
    write_frame(
        &mut wire,
        &Frame {
            kind: FRAME_METHOD,
            channel: 7,
            payload: b"basic.publish".to_vec(),
        },
    );
    write_frame(
        &mut wire,
        &Frame {
            kind: FRAME_METHOD,
            channel: 8,
            payload: Vec::new(),
        },
    );
    eprintln!("[writer] {} bytes: {wire:x}", wire.size());

    // Feed the reader a few bytes at a time, as a socket would.
    let mut incoming = Buffer::new();
    let mut chunks = wire.flush();
    while !chunks.is_empty() {
        let n = chunks.len().min(5);
        incoming.append_string(chunks.split_to(n));
        while let Some(frame) = read_frame(&mut incoming)? {
            eprintln!(
                "[reader] kind={} channel={} payload={}",
                frame.kind,
                frame.channel,
                String::from_utf8_lossy(&frame.payload)
            );
        }
    }

    Ok(())
}
