//! # HeapPage - Page Image Codec
//!
//! A heap page holds a fixed number of tuple slots for one table. The slot
//! count is derived from the page size and the table's tuple width, never
//! stored:
//!
//! ```text
//! capacity   = (PAGE_SIZE * 8) / (tuple_bytes * 8 + 1)
//! header_len = ceil(capacity / 8)
//! ```
//!
//! Each slot costs its tuple width plus one occupancy bit, which is where
//! the `8 * width + 1` divisor comes from.
//!
//! ## Page Image
//!
//! ```text
//! +--------------------+----------+----------+ ... +----------+---------+
//! | occupancy bitmap   | slot 0   | slot 1   |     | slot N-1 | padding |
//! | ceil(N/8) bytes    | W bytes  | W bytes  |     | W bytes  | zeroed  |
//! +--------------------+----------+----------+ ... +----------+---------+
//! ```
//!
//! Bitmap bits are LSB-first: slot `i` maps to bit `i % 8` of byte `i / 8`.
//! A slot's bytes are decoded only when its bit is set; empty slots are
//! zeroed on emit.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::records::{RecordId, Tuple, TupleDesc};
use crate::storage::{PageId, PAGE_SIZE};

/// Decoded in-memory form of one heap page.
#[derive(Debug, Clone)]
pub struct HeapPage {
    pid: PageId,
    desc: Arc<TupleDesc>,
    slots: Vec<Option<Tuple>>,
}

impl HeapPage {
    /// Number of tuple slots a page holds for the given descriptor.
    pub fn capacity(desc: &TupleDesc) -> usize {
        (PAGE_SIZE * 8) / (desc.byte_size() * 8 + 1)
    }

    /// Byte length of the occupancy bitmap for the given descriptor.
    pub fn header_len(desc: &TupleDesc) -> usize {
        Self::capacity(desc).div_ceil(8)
    }

    /// Decodes a page image into located tuples.
    ///
    /// `data` must be exactly [`PAGE_SIZE`] bytes. Every occupied slot is
    /// decoded eagerly; corruption in any slot fails the whole page.
    pub fn parse(pid: PageId, data: &[u8], desc: Arc<TupleDesc>) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "page image must be exactly {} bytes, got {}",
            PAGE_SIZE,
            data.len()
        );

        let capacity = Self::capacity(&desc);
        ensure!(
            capacity > 0,
            "tuple of {} bytes does not fit in a {} byte page",
            desc.byte_size(),
            PAGE_SIZE
        );

        let header = &data[..Self::header_len(&desc)];
        let width = desc.byte_size();
        let slots_base = Self::header_len(&desc);

        let mut slots = Vec::with_capacity(capacity);
        for slot_no in 0..capacity {
            if header[slot_no / 8] & (1 << (slot_no % 8)) == 0 {
                slots.push(None);
                continue;
            }
            let offset = slots_base + slot_no * width;
            let mut tuple = Tuple::decode(Arc::clone(&desc), &data[offset..offset + width])?;
            tuple.set_record_id(RecordId::new(pid, slot_no));
            slots.push(Some(tuple));
        }

        Ok(Self { pid, desc, slots })
    }

    pub fn page_id(&self) -> PageId {
        self.pid
    }

    pub fn desc(&self) -> &Arc<TupleDesc> {
        &self.desc
    }

    /// Total slot count (occupied and empty).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_slot_occupied(&self, slot_no: usize) -> bool {
        matches!(self.slots.get(slot_no), Some(Some(_)))
    }

    /// Tuple in the given slot, or `None` when empty or out of range.
    pub fn tuple(&self, slot_no: usize) -> Option<&Tuple> {
        self.slots.get(slot_no).and_then(|s| s.as_ref())
    }

    /// Occupied tuples in slot-ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Re-emits the exact [`PAGE_SIZE`] byte image of this page.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut image = vec![0u8; PAGE_SIZE];
        let width = self.desc.byte_size();
        let slots_base = Self::header_len(&self.desc);

        let mut encoded = Vec::with_capacity(width);
        for (slot_no, slot) in self.slots.iter().enumerate() {
            let Some(tuple) = slot else { continue };
            image[slot_no / 8] |= 1 << (slot_no % 8);
            encoded.clear();
            tuple.encode_into(&mut encoded)?;
            let offset = slots_base + slot_no * width;
            image[offset..offset + width].copy_from_slice(&encoded);
        }

        Ok(image)
    }
}
