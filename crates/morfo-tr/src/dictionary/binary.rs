// Binary lexicon: fixed-size item records followed by a UTF-8 string pool
//
// Layout (little-endian):
// - 16-byte header: magic, cookie, version, flags, item count
// - `count` records of 44 bytes each
// - string pool referenced by (offset, length) pairs in the records
//
// Loading a binary lexicon skips parsing and attribute inference; the
// records carry the already resolved items.

use bytemuck::{Pod, Zeroable};
use morfo_core::{DictionaryItem, PrimaryPos, RootAttributes, RootLexicon, SecondaryPos};

use crate::DictionaryError;

const MAGIC: u32 = 0x4D4F_5246;
const COOKIE: u32 = 0x4C45_5849;
const VERSION: u16 = 1;
const NO_REFERENCE: u32 = u32::MAX;

pub const HEADER_SIZE: usize = size_of::<Header>();
pub const RECORD_SIZE: usize = size_of::<ItemRecord>();

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Header {
    magic: u32,
    cookie: u32,
    version: u16,
    flags: u16,
    count: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ItemRecord {
    lemma: [u32; 2],
    root: [u32; 2],
    pronunciation: [u32; 2],
    /// Offset is `NO_REFERENCE` when the item has no reference.
    reference: [u32; 2],
    attributes: u32,
    index: u32,
    primary: u8,
    secondary: u8,
    _pad: u16,
}

/// Whether `data` starts with the binary lexicon magic.
pub fn is_binary(data: &[u8]) -> bool {
    data.len() >= 8 && data[..4] == MAGIC.to_le_bytes() && data[4..8] == COOKIE.to_le_bytes()
}

/// Serialize a lexicon. Items keep their insertion order.
pub fn write(lexicon: &RootLexicon) -> Vec<u8> {
    let mut pool = String::new();
    let mut intern = |s: &str| -> [u32; 2] {
        let off = pool.len() as u32;
        pool.push_str(s);
        [off, s.len() as u32]
    };

    let mut records = Vec::with_capacity(lexicon.len());
    for item in lexicon.all_items() {
        records.push(ItemRecord {
            lemma: intern(&item.lemma),
            root: intern(&item.root),
            pronunciation: intern(&item.pronunciation),
            reference: item.reference().map_or([NO_REFERENCE, 0], &mut intern),
            attributes: item.attributes.bits(),
            index: item.index(),
            primary: item.primary_pos as u8,
            secondary: item.secondary_pos as u8,
            _pad: 0,
        });
    }

    let header = Header {
        magic: MAGIC,
        cookie: COOKIE,
        version: VERSION,
        flags: 0,
        count: records.len() as u32,
    };
    let mut out = Vec::with_capacity(HEADER_SIZE + records.len() * RECORD_SIZE + pool.len());
    out.extend_from_slice(bytemuck::bytes_of(&header));
    out.extend_from_slice(bytemuck::cast_slice(&records));
    out.extend_from_slice(pool.as_bytes());
    out
}

/// Deserialize a lexicon written by [`write`].
pub fn read(data: &[u8]) -> Result<RootLexicon, DictionaryError> {
    if data.len() < HEADER_SIZE {
        return Err(DictionaryError::Truncated {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }
    let header: Header = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);
    if header.magic != MAGIC || header.cookie != COOKIE {
        return Err(DictionaryError::BadMagic);
    }
    if header.version != VERSION {
        return Err(DictionaryError::UnsupportedVersion(header.version));
    }

    let count = header.count as usize;
    let pool_start = HEADER_SIZE + count * RECORD_SIZE;
    if data.len() < pool_start {
        return Err(DictionaryError::Truncated {
            expected: pool_start,
            actual: data.len(),
        });
    }
    let pool = &data[pool_start..];

    let mut lexicon = RootLexicon::new();
    for i in 0..count {
        let start = HEADER_SIZE + i * RECORD_SIZE;
        let record: ItemRecord = bytemuck::pod_read_unaligned(&data[start..start + RECORD_SIZE]);
        lexicon.add(decode_record(i, &record, pool)?);
    }
    log::debug!("read {} items from binary lexicon", lexicon.len());
    Ok(lexicon)
}

fn decode_record(i: usize, r: &ItemRecord, pool: &[u8]) -> Result<DictionaryItem, DictionaryError> {
    let bad = |message: String| DictionaryError::BadRecord { record: i, message };
    let text = |span: [u32; 2]| pool_str(pool, span).map_err(bad);

    let primary = *PrimaryPos::ALL
        .get(r.primary as usize)
        .ok_or_else(|| bad(format!("primary POS {}", r.primary)))?;
    let secondary = *SecondaryPos::ALL
        .get(r.secondary as usize)
        .ok_or_else(|| bad(format!("secondary POS {}", r.secondary)))?;

    let mut item = DictionaryItem::new(
        text(r.lemma)?,
        text(r.root)?,
        primary,
        secondary,
        RootAttributes::from_bits(r.attributes),
    )
    .with_pronunciation(text(r.pronunciation)?)
    .with_index(r.index);
    if r.reference[0] != NO_REFERENCE {
        item.set_reference(text(r.reference)?);
    }
    Ok(item)
}

fn pool_str(pool: &[u8], [off, len]: [u32; 2]) -> Result<&str, String> {
    let (off, len) = (off as usize, len as usize);
    let bytes = pool
        .get(off..off + len)
        .ok_or_else(|| format!("string {off}+{len} outside the pool"))?;
    std::str::from_utf8(bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::load_text;

    const LEXICON: &str = "\
kitap
zeytin
yağ
zeytinyağı [A:CompoundP3sg; Roots:zeytin-yağ]
TBMM [P:Noun,Abbrv]
yüz [P:Num,Card; Index:2]
gelmek [A:Aorist_I]
";

    #[test]
    fn layout_sizes() {
        assert_eq!(HEADER_SIZE, 16);
        assert_eq!(RECORD_SIZE, 44);
    }

    #[test]
    fn written_lexicon_reads_back() {
        let original = load_text(LEXICON).unwrap();
        let data = write(&original);
        assert!(is_binary(&data));

        let restored = read(&data).unwrap();
        assert_eq!(restored.len(), original.len());
        for (a, b) in original.all_items().zip(restored.all_items()) {
            assert_eq!(a, b);
        }
        let compound = restored.by_id("zeytinyağı_Noun").unwrap();
        assert_eq!(compound.reference(), Some("zeytinyağ_Noun"));
    }

    #[test]
    fn text_is_not_binary() {
        assert!(!is_binary(LEXICON.as_bytes()));
        assert!(!is_binary(&[]));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(read(&[0u8; 4]), Err(DictionaryError::Truncated { expected: 16, actual: 4 })));
        assert!(matches!(read(&[0u8; 16]), Err(DictionaryError::BadMagic)));

        let mut data = write(&load_text("elma").unwrap());
        data[8] = 9;
        assert!(matches!(read(&data), Err(DictionaryError::UnsupportedVersion(9))));

        let data = write(&load_text("elma").unwrap());
        assert!(matches!(read(&data[..20]), Err(DictionaryError::Truncated { .. })));
    }

    #[test]
    fn rejects_strings_outside_the_pool() {
        let mut data = write(&load_text("elma").unwrap());
        data.truncate(HEADER_SIZE + RECORD_SIZE + 2);
        assert!(matches!(read(&data), Err(DictionaryError::BadRecord { record: 0, .. })));
    }
}
