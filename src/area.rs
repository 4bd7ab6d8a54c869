//! Memory area definitions for the S7 protocol.
//!
//! This module defines the [`Area`] enum which represents the addressable
//! memory regions of Siemens S7 controllers. Each area has a protocol code,
//! an element size, and an addressing mode.
//!
//! # Memory Areas Overview
//!
//! | Area | Description | Element size | Addressing |
//! |------|-------------|:------------:|------------|
//! | PE | Process inputs | 1 byte | bit-shifted byte offset |
//! | PA | Process outputs | 1 byte | bit-shifted byte offset |
//! | MK | Merkers (flag memory) | 1 byte | bit-shifted byte offset |
//! | DB | Data blocks | 1 byte | bit-shifted byte offset + DB number |
//! | CT | Counters | 2 bytes | plain element index |
//! | TM | Timers | 2 bytes | plain element index |
//!
//! # Example
//!
//! ```
//! use siemens_s7::Area;
//!
//! // Counters and timers transfer two bytes per element
//! assert_eq!(Area::CT.word_size(), 2);
//! assert_eq!(Area::DB.word_size(), 1);
//!
//! // Display the area name
//! assert_eq!(Area::DB.to_string(), "DB");
//! ```

/// Memory areas addressable in S7 controllers.
///
/// The area code is placed directly into read/write request telegrams.
/// Byte-organized areas (PE, PA, MK, DB) are addressed on the wire as bit
/// offsets, so the byte offset supplied by the caller is shifted left by
/// three; counters and timers are addressed as plain element indexes and
/// carry their own word-length selector.
///
/// # Example
///
/// ```
/// use siemens_s7::Area;
///
/// let areas = [Area::PE, Area::PA, Area::MK, Area::DB, Area::CT, Area::TM];
/// for area in areas {
///     println!("{}: {} byte(s) per element", area, area.word_size());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// PE (process inputs) area - the input process image.
    PE,
    /// PA (process outputs) area - the output process image.
    PA,
    /// MK (merker) area - flag memory.
    MK,
    /// DB (data block) area - numbered data blocks.
    DB,
    /// CT (counter) area - counter values, two bytes per element.
    CT,
    /// TM (timer) area - timer values, two bytes per element.
    TM,
}

impl Area {
    /// Returns the protocol code identifying this area in request telegrams.
    pub(crate) fn code(self) -> u8 {
        match self {
            Area::PE => 0x81,
            Area::PA => 0x82,
            Area::MK => 0x83,
            Area::DB => 0x84,
            Area::CT => 0x1C,
            Area::TM => 0x1D,
        }
    }

    /// Returns the word-length selector byte for request telegrams.
    ///
    /// Byte-organized areas use the byte selector; counters and timers use
    /// their dedicated selectors, which also switch the controller to plain
    /// element addressing.
    pub(crate) fn word_length_code(self) -> u8 {
        match self {
            Area::CT => 0x1C,
            Area::TM => 0x1D,
            _ => 0x02,
        }
    }

    /// Returns the number of bytes one element of this area occupies.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::Area;
    ///
    /// assert_eq!(Area::MK.word_size(), 1);
    /// assert_eq!(Area::TM.word_size(), 2);
    /// ```
    pub fn word_size(self) -> usize {
        match self {
            Area::CT | Area::TM => 2,
            _ => 1,
        }
    }

    /// Returns whether the wire address is the bit-shifted byte offset.
    ///
    /// Counters and timers are the exception: they are addressed by plain
    /// element index.
    pub fn is_bit_addressed(self) -> bool {
        !matches!(self, Area::CT | Area::TM)
    }

    /// Returns whether read/write requests for this area carry a DB number.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::Area;
    ///
    /// assert!(Area::DB.uses_db_number());
    /// assert!(!Area::MK.uses_db_number());
    /// ```
    pub fn uses_db_number(self) -> bool {
        matches!(self, Area::DB)
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Area::PE => write!(f, "PE"),
            Area::PA => write!(f, "PA"),
            Area::MK => write!(f, "MK"),
            Area::DB => write!(f, "DB"),
            Area::CT => write!(f, "CT"),
            Area::TM => write!(f, "TM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_codes() {
        assert_eq!(Area::PE.code(), 0x81);
        assert_eq!(Area::PA.code(), 0x82);
        assert_eq!(Area::MK.code(), 0x83);
        assert_eq!(Area::DB.code(), 0x84);
        assert_eq!(Area::CT.code(), 0x1C);
        assert_eq!(Area::TM.code(), 0x1D);
    }

    #[test]
    fn test_word_length_codes() {
        assert_eq!(Area::PE.word_length_code(), 0x02);
        assert_eq!(Area::PA.word_length_code(), 0x02);
        assert_eq!(Area::MK.word_length_code(), 0x02);
        assert_eq!(Area::DB.word_length_code(), 0x02);
        assert_eq!(Area::CT.word_length_code(), 0x1C);
        assert_eq!(Area::TM.word_length_code(), 0x1D);
    }

    #[test]
    fn test_word_sizes() {
        assert_eq!(Area::PE.word_size(), 1);
        assert_eq!(Area::PA.word_size(), 1);
        assert_eq!(Area::MK.word_size(), 1);
        assert_eq!(Area::DB.word_size(), 1);
        assert_eq!(Area::CT.word_size(), 2);
        assert_eq!(Area::TM.word_size(), 2);
    }

    #[test]
    fn test_addressing_mode() {
        assert!(Area::PE.is_bit_addressed());
        assert!(Area::DB.is_bit_addressed());
        assert!(!Area::CT.is_bit_addressed());
        assert!(!Area::TM.is_bit_addressed());
    }

    #[test]
    fn test_uses_db_number() {
        assert!(Area::DB.uses_db_number());
        assert!(!Area::PE.uses_db_number());
        assert!(!Area::CT.uses_db_number());
    }

    #[test]
    fn test_display() {
        assert_eq!(Area::PE.to_string(), "PE");
        assert_eq!(Area::PA.to_string(), "PA");
        assert_eq!(Area::MK.to_string(), "MK");
        assert_eq!(Area::DB.to_string(), "DB");
        assert_eq!(Area::CT.to_string(), "CT");
        assert_eq!(Area::TM.to_string(), "TM");
    }
}
