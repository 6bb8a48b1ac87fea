/// Capacity of the reusable diagnostic dump buffer.
pub const DUMP_BUFFER_SIZE: usize = 1024;

const BYTES_PER_LINE: usize = 16;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

struct Cursor<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn push(&mut self, byte: u8) -> bool {
        if self.pos >= self.out.len() {
            return false;
        }
        self.out[self.pos] = byte;
        self.pos += 1;
        true
    }

    fn push_hex(&mut self, byte: u8) -> bool {
        self.push(HEX_DIGITS[(byte >> 4) as usize]) && self.push(HEX_DIGITS[(byte & 0x0f) as usize])
    }
}

/// Render `payload` as a hex dump into `out`, 16 bytes per line with an
/// offset column and a printable-ASCII gutter.
///
/// Never writes past `out.len()`; if the dump does not fit, the output is
/// truncated instead. Returns the number of bytes written; 0 means nothing
/// was rendered and the caller should not log.
pub fn render_into(out: &mut [u8], payload: &[u8]) -> usize {
    let mut w = Cursor { out, pos: 0 };

    'lines: for (index, chunk) in payload.chunks(BYTES_PER_LINE).enumerate() {
        if index > 0 && !w.push(b'\n') {
            break;
        }

        let offset = (index * BYTES_PER_LINE) as u16;
        if !(w.push_hex((offset >> 8) as u8) && w.push_hex(offset as u8)) {
            break;
        }
        if !(w.push(b' ') && w.push(b' ')) {
            break;
        }

        // hex column, blank-padded so the gutter lines up on a short tail
        for slot in 0..BYTES_PER_LINE {
            let ok = match chunk.get(slot) {
                Some(&byte) => w.push_hex(byte),
                None => w.push(b' ') && w.push(b' '),
            };
            if !ok || !w.push(b' ') {
                break 'lines;
            }
        }

        if !(w.push(b' ') && w.push(b'|')) {
            break;
        }
        for &byte in chunk {
            let printable = if (0x20..0x7f).contains(&byte) { byte } else { b'.' };
            if !w.push(printable) {
                break 'lines;
            }
        }
        if !w.push(b'|') {
            break;
        }
    }

    w.pos
}

/// Fixed-capacity buffer reused for every rendered payload.
///
/// Each render fully overwrites the previous contents, so the result is
/// only valid until the next call.
pub struct DumpBuffer {
    buf: [u8; DUMP_BUFFER_SIZE],
    len: usize,
}

impl DumpBuffer {
    pub fn new() -> Self {
        Self {
            buf: [0; DUMP_BUFFER_SIZE],
            len: 0,
        }
    }

    /// Overwrite the buffer with a fresh dump of `payload` and return the
    /// number of bytes rendered.
    pub fn render(&mut self, payload: &[u8]) -> usize {
        self.len = render_into(&mut self.buf, payload);
        self.len
    }

    pub fn as_str(&self) -> &str {
        // render_into only emits ASCII
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl Default for DumpBuffer {
    fn default() -> Self {
        Self::new()
    }
}
