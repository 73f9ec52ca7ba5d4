// See https://en.wikipedia.org/wiki/Tar_%28computing%29#UStar_format

/// The type of file a header describes.
///
/// Only the flags in common ustar/old-GNU use get named constructors;
/// anything else round-trips through [`EntryType::new`]/[`EntryType::as_byte`]
/// unchanged, since the codec does not interpret flags it doesn't recognize.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryType {
    byte: u8,
}

impl EntryType {
    /// Creates an entry type from a raw type-flag byte.
    pub fn new(byte: u8) -> EntryType {
        EntryType { byte }
    }

    /// A regular file (`'0'` or `'\0'`).
    pub fn file() -> EntryType {
        EntryType::new(b'0')
    }

    /// A hard link (`'1'`).
    pub fn hard_link() -> EntryType {
        EntryType::new(b'1')
    }

    /// A symbolic link (`'2'`).
    pub fn symlink() -> EntryType {
        EntryType::new(b'2')
    }

    /// A character device (`'3'`).
    pub fn character_special() -> EntryType {
        EntryType::new(b'3')
    }

    /// A block device (`'4'`).
    pub fn block_special() -> EntryType {
        EntryType::new(b'4')
    }

    /// A directory (`'5'`).
    pub fn dir() -> EntryType {
        EntryType::new(b'5')
    }

    /// A FIFO (`'6'`).
    pub fn fifo() -> EntryType {
        EntryType::new(b'6')
    }

    /// A contiguous file (`'7'`).
    pub fn contiguous() -> EntryType {
        EntryType::new(b'7')
    }

    /// True for a regular file, whether flagged `'0'` or the legacy `'\0'`.
    pub fn is_file(&self) -> bool {
        self.byte == 0 || self.byte == b'0'
    }

    /// True for a hard link.
    pub fn is_hard_link(&self) -> bool {
        self.byte == b'1'
    }

    /// True for a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.byte == b'2'
    }

    /// True for a character device.
    pub fn is_character_special(&self) -> bool {
        self.byte == b'3'
    }

    /// True for a block device.
    pub fn is_block_special(&self) -> bool {
        self.byte == b'4'
    }

    /// True for a directory.
    pub fn is_dir(&self) -> bool {
        self.byte == b'5'
    }

    /// True for a FIFO.
    pub fn is_fifo(&self) -> bool {
        self.byte == b'6'
    }

    /// True for a contiguous file.
    pub fn is_contiguous(&self) -> bool {
        self.byte == b'7'
    }

    /// True if this flag isn't one of the recognized ustar/old-GNU kinds.
    pub fn is_unknown(&self) -> bool {
        !(self.is_file()
            || self.is_hard_link()
            || self.is_symlink()
            || self.is_character_special()
            || self.is_block_special()
            || self.is_dir()
            || self.is_fifo()
            || self.is_contiguous())
    }

    /// The raw type-flag byte.
    pub fn as_byte(&self) -> u8 {
        self.byte
    }
}

impl Default for EntryType {
    fn default() -> EntryType {
        EntryType::file()
    }
}

#[cfg(test)]
mod tests {
    use super::EntryType;

    #[test]
    fn named_constructors_round_trip_through_the_raw_byte() {
        assert!(EntryType::file().is_file());
        assert!(EntryType::new(0).is_file());
        assert!(EntryType::dir().is_dir());
        assert!(EntryType::symlink().is_symlink());
        assert_eq!(EntryType::fifo().as_byte(), b'6');
    }

    #[test]
    fn unrecognized_flags_are_surfaced_verbatim() {
        let ty = EntryType::new(b'L');
        assert!(ty.is_unknown());
        assert_eq!(ty.as_byte(), b'L');
    }
}
