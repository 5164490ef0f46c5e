//! Broadcast Wave byte image builder
//!
//! Writes chunks exactly as given so tests can produce both well-formed
//! recorder output and broken containers.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

/// Size of the fixed part of a `bext` chunk before the coding history
const BEXT_FIXED_LEN: usize = 602;

pub struct BwfBuilder {
    form: [u8; 4],
    chunks: Vec<([u8; 4], Vec<u8>)>,
}

impl Default for BwfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BwfBuilder {
    pub fn new() -> Self {
        Self {
            form: *b"WAVE",
            chunks: Vec::new(),
        }
    }

    /// Replace the `WAVE` form type
    pub fn form(mut self, form: &[u8; 4]) -> Self {
        self.form = *form;
        self
    }

    /// Append a raw chunk
    pub fn chunk(mut self, id: &[u8; 4], body: Vec<u8>) -> Self {
        self.chunks.push((*id, body));
        self
    }

    /// PCM `fmt ` chunk
    pub fn fmt(self, channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let block_align = channels * bits_per_sample.div_ceil(8);
        let mut body = Vec::new();
        body.write_u16::<LittleEndian>(1).unwrap();
        body.write_u16::<LittleEndian>(channels).unwrap();
        body.write_u32::<LittleEndian>(sample_rate).unwrap();
        body.write_u32::<LittleEndian>(sample_rate * u32::from(block_align))
            .unwrap();
        body.write_u16::<LittleEndian>(block_align).unwrap();
        body.write_u16::<LittleEndian>(bits_per_sample).unwrap();
        self.chunk(b"fmt ", body)
    }

    /// `bext` chunk with origination date/time and time reference
    pub fn bext(self, date: &str, time: &str, time_reference: u64, coding_history: &str) -> Self {
        let mut body = vec![0u8; BEXT_FIXED_LEN];
        body[320..320 + date.len()].copy_from_slice(date.as_bytes());
        body[330..330 + time.len()].copy_from_slice(time.as_bytes());
        LittleEndian::write_u64_into(&[time_reference], &mut body[338..346]);
        body[346] = 1;
        body.extend_from_slice(coding_history.as_bytes());
        self.chunk(b"bext", body)
    }

    /// `bext` chunk with every field empty
    pub fn empty_bext(self) -> Self {
        self.chunk(b"bext", vec![0u8; BEXT_FIXED_LEN])
    }

    /// `iXML` chunk holding `xml`
    pub fn ixml(self, xml: &str) -> Self {
        self.chunk(b"iXML", xml.as_bytes().to_vec())
    }

    /// `data` chunk of silence
    pub fn silence(self, bytes: usize) -> Self {
        self.chunk(b"data", vec![0u8; bytes])
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&self.form);
        for (id, chunk) in &self.chunks {
            body.extend_from_slice(id);
            body.write_u32::<LittleEndian>(chunk.len() as u32).unwrap();
            body.extend_from_slice(chunk);
            if chunk.len() % 2 == 1 {
                body.push(0);
            }
        }

        let mut out = Vec::with_capacity(body.len() + 8);
        out.extend_from_slice(b"RIFF");
        out.write_u32::<LittleEndian>(body.len() as u32).unwrap();
        out.extend_from_slice(&body);
        out
    }
}
