//! Shared encode/decode primitives for list-valued fields
//!
//! Identifier lists are encoded as `u8 count`, then per identifier
//! `u8 length-in-fragments` followed by the raw bytes. Label lists are
//! `u8 count` followed by one fragment per label.

use meridian_core::{Fragment, FullId, MeridianError, MeridianResult, NodeLabel, FRAG_LEN};

pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    pub fn u8(&mut self) -> MeridianResult<u8> {
        let b = *self.buf.get(self.pos).ok_or(MeridianError::BufferTooShort {
            expected: self.pos + 1,
            actual: self.buf.len(),
        })?;
        self.pos += 1;
        Ok(b)
    }

    pub fn bytes(&mut self, n: usize) -> MeridianResult<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(MeridianError::BufferTooShort {
                expected: self.pos + n,
                actual: self.buf.len(),
            });
        }
        let s = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    /// An identifier of `count` fragments.
    pub fn id(&mut self, count: usize) -> MeridianResult<FullId> {
        FullId::from_bytes(self.bytes(count * FRAG_LEN)?)
    }

    pub fn id_list(&mut self) -> MeridianResult<Vec<FullId>> {
        let count = self.u8()? as usize;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let frags = self.u8()? as usize;
            ids.push(self.id(frags)?);
        }
        Ok(ids)
    }

    pub fn label_list(&mut self) -> MeridianResult<Vec<NodeLabel>> {
        let count = self.u8()? as usize;
        let mut labels = Vec::with_capacity(count);
        for _ in 0..count {
            labels.push(NodeLabel::new(Fragment::from_slice(
                self.bytes(FRAG_LEN)?,
            )?));
        }
        Ok(labels)
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

pub(crate) fn write_id_list(buf: &mut Vec<u8>, ids: &[FullId]) {
    buf.push(ids.len() as u8);
    for id in ids {
        buf.push(id.fragment_count() as u8);
        buf.extend_from_slice(id.as_bytes());
    }
}

pub(crate) fn write_label_list(buf: &mut Vec<u8>, labels: &[NodeLabel]) {
    buf.push(labels.len() as u8);
    for l in labels {
        buf.extend_from_slice(l.as_fragment().as_bytes());
    }
}
