//! Big-endian LC-3 image loading.

use crate::TermError;
use std::io::Read;

/// Load a big-endian LC-3 image into `memory`.
///
/// The first word is the load origin; every word after it loads at
/// consecutive addresses starting there. Returns the origin so the
/// caller can set the initial program counter if it differs from
/// [`lc3_cpu::PC_START`].
pub fn load_image(mut reader: impl Read, memory: &mut [u16; 65536]) -> Result<u16, TermError> {
    let origin = read_be_word(&mut reader)?;
    let capacity = 0x10000 - usize::from(origin);

    let mut words = Vec::new();
    loop {
        match read_be_word_opt(&mut reader)? {
            Some(word) => words.push(word),
            None => break,
        }
    }

    if words.len() > capacity {
        return Err(TermError::ImageTooLarge {
            word_count: words.len(),
            capacity,
        });
    }

    for (offset, word) in words.into_iter().enumerate() {
        memory[usize::from(origin) + offset] = word;
    }

    Ok(origin)
}

fn read_be_word(reader: &mut impl Read) -> Result<u16, TermError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

fn read_be_word_opt(reader: &mut impl Read) -> Result<Option<u16>, TermError> {
    let mut buf = [0u8; 2];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(u16::from_be_bytes(buf))),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_words_starting_at_origin() {
        let image: [u8; 6] = [0x30, 0x00, 0x12, 0x34, 0x56, 0x78];
        let mut memory = [0u16; 65536];
        let origin = load_image(&image[..], &mut memory).unwrap();

        assert_eq!(origin, 0x3000);
        assert_eq!(memory[0x3000], 0x1234);
        assert_eq!(memory[0x3001], 0x5678);
    }

    #[test]
    fn rejects_image_that_overruns_address_space() {
        let mut image = vec![0xFFu8, 0xFFu8];
        image.extend(std::iter::repeat(0u8).take(8));
        let mut memory = [0u16; 65536];

        let err = load_image(&image[..], &mut memory).unwrap_err();
        assert!(matches!(err, TermError::ImageTooLarge { .. }));
    }
}
