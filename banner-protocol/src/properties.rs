//! Device properties exposed on the message bus

/// Properties the banner node understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Property {
    /// Text shown on the banner
    Message,
    /// Scroll frame delay in milliseconds
    Speed,
    /// Matrix intensity (1-15)
    Brightness,
    /// Restart request, never published
    Reboot,
}

/// Value datatype announced to the message bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Datatype {
    String,
    Integer,
    Boolean,
}

// Wire format values
const PROPERTY_MESSAGE: u8 = 0x01;
const PROPERTY_SPEED: u8 = 0x02;
const PROPERTY_BRIGHTNESS: u8 = 0x03;
const PROPERTY_REBOOT: u8 = 0x04;

const DATATYPE_STRING: u8 = 0x01;
const DATATYPE_INTEGER: u8 = 0x02;
const DATATYPE_BOOLEAN: u8 = 0x03;

impl Property {
    /// Bus identifier of this property
    pub fn id(self) -> &'static str {
        match self {
            Property::Message => "message",
            Property::Speed => "speed",
            Property::Brightness => "brightness",
            Property::Reboot => "reboot",
        }
    }

    /// Human readable name used when advertising
    pub fn name(self) -> &'static str {
        match self {
            Property::Message => "Banner Text",
            Property::Speed => "Scrolling Speed",
            Property::Brightness => "Display Brightness",
            Property::Reboot => "Reboot Device",
        }
    }

    /// Value datatype of this property
    pub fn datatype(self) -> Datatype {
        match self {
            Property::Message => Datatype::String,
            Property::Speed | Property::Brightness => Datatype::Integer,
            Property::Reboot => Datatype::Boolean,
        }
    }

    /// Look up a property by its bus identifier, ignoring ASCII case
    pub fn from_id(id: &str) -> Option<Self> {
        [
            Property::Message,
            Property::Speed,
            Property::Brightness,
            Property::Reboot,
        ]
        .into_iter()
        .find(|p| p.id().eq_ignore_ascii_case(id))
    }

    /// Parse a property from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            PROPERTY_MESSAGE => Some(Property::Message),
            PROPERTY_SPEED => Some(Property::Speed),
            PROPERTY_BRIGHTNESS => Some(Property::Brightness),
            PROPERTY_REBOOT => Some(Property::Reboot),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Property::Message => PROPERTY_MESSAGE,
            Property::Speed => PROPERTY_SPEED,
            Property::Brightness => PROPERTY_BRIGHTNESS,
            Property::Reboot => PROPERTY_REBOOT,
        }
    }
}

impl Datatype {
    /// Parse a datatype from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            DATATYPE_STRING => Some(Datatype::String),
            DATATYPE_INTEGER => Some(Datatype::Integer),
            DATATYPE_BOOLEAN => Some(Datatype::Boolean),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Datatype::String => DATATYPE_STRING,
            Datatype::Integer => DATATYPE_INTEGER,
            Datatype::Boolean => DATATYPE_BOOLEAN,
        }
    }
}

/// How a property is announced on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PropertyDescriptor {
    pub property: Property,
    pub datatype: Datatype,
    /// Broker keeps the last published value
    pub retained: bool,
    /// Bus clients may set the value
    pub settable: bool,
}

const FLAG_RETAINED: u8 = 0x01;
const FLAG_SETTABLE: u8 = 0x02;

impl PropertyDescriptor {
    const fn settable(property: Property, datatype: Datatype) -> Self {
        Self {
            property,
            datatype,
            retained: true,
            settable: true,
        }
    }

    /// Pack the retained/settable flags into one byte
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.retained {
            flags |= FLAG_RETAINED;
        }
        if self.settable {
            flags |= FLAG_SETTABLE;
        }
        flags
    }

    /// Rebuild a descriptor from its wire bytes
    pub fn from_bytes(property: u8, datatype: u8, flags: u8) -> Option<Self> {
        Some(Self {
            property: Property::from_byte(property)?,
            datatype: Datatype::from_byte(datatype)?,
            retained: flags & FLAG_RETAINED != 0,
            settable: flags & FLAG_SETTABLE != 0,
        })
    }
}

/// Properties announced at setup
///
/// `reboot` is accepted when set but not advertised.
pub const ADVERTISED_PROPERTIES: [PropertyDescriptor; 3] = [
    PropertyDescriptor::settable(Property::Message, Datatype::String),
    PropertyDescriptor::settable(Property::Speed, Datatype::Integer),
    PropertyDescriptor::settable(Property::Brightness, Datatype::Integer),
];

/// Parse an integer property value leniently
///
/// Skips leading whitespace, accepts an optional sign, then reads decimal
/// digits up to the first non-digit. Text without leading digits parses as
/// 0. Values beyond `i32` saturate.
pub fn parse_int(value: &str) -> i32 {
    let mut bytes = value.trim_start().bytes().peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut magnitude: i64 = 0;
    for b in bytes.take_while(u8::is_ascii_digit) {
        magnitude = (magnitude * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }

    let signed = if negative { -magnitude } else { magnitude };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_id_ignores_case() {
        assert_eq!(Property::from_id("message"), Some(Property::Message));
        assert_eq!(Property::from_id("SPEED"), Some(Property::Speed));
        assert_eq!(Property::from_id("Brightness"), Some(Property::Brightness));
        assert_eq!(Property::from_id("reBoot"), Some(Property::Reboot));
        assert_eq!(Property::from_id("color"), None);
        assert_eq!(Property::from_id(""), None);
    }

    #[test]
    fn test_unknown_property_byte() {
        assert!(Property::from_byte(0x00).is_none());
        assert!(Property::from_byte(0xFF).is_none());
    }

    #[test]
    fn test_advertised_properties_exclude_reboot() {
        assert!(ADVERTISED_PROPERTIES
            .iter()
            .all(|d| d.property != Property::Reboot && d.retained && d.settable));
        assert_eq!(ADVERTISED_PROPERTIES[0].datatype, Datatype::String);
        assert_eq!(ADVERTISED_PROPERTIES[1].datatype, Datatype::Integer);
    }

    #[test]
    fn test_descriptor_flags() {
        let d = ADVERTISED_PROPERTIES[2];
        assert_eq!(d.flags(), 0x03);
        let rebuilt =
            PropertyDescriptor::from_bytes(d.property.to_byte(), d.datatype.to_byte(), d.flags());
        assert_eq!(rebuilt, Some(d));
    }

    #[test]
    fn test_parse_int_lenient() {
        assert_eq!(parse_int("80"), 80);
        assert_eq!(parse_int("  42"), 42);
        assert_eq!(parse_int("+7"), 7);
        assert_eq!(parse_int("-3"), -3);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int("3.9"), 3);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999999"), i32::MIN);
    }

    proptest! {
        #[test]
        fn test_parse_int_matches_decimal(v in any::<i32>()) {
            let mut buf = heapless::String::<16>::new();
            core::fmt::Write::write_fmt(&mut buf, format_args!("{}", v)).unwrap();
            prop_assert_eq!(parse_int(&buf), v);
        }
    }
}
