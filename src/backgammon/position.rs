use std::fmt::{self, Debug};

/// Where a checker is moved from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Bar,
    Point(u8),
}

/// Where a checker ends up.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Point(u8),
    Off,
}

impl Source {
    pub fn point_index(&self) -> Option<u8> {
        match self {
            Source::Point(index) => Some(*index),
            Source::Bar => None,
        }
    }
}

impl Destination {
    pub fn point_index(&self) -> Option<u8> {
        match self {
            Destination::Point(index) => Some(*index),
            Destination::Off => None,
        }
    }
}

impl Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Bar => write!(f, "Bar"),
            Source::Point(index) => write!(f, "Point({})", index),
        }
    }
}

impl Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Point(index) => write!(f, "Point({})", index),
            Destination::Off => write!(f, "Off"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Bar => write!(f, "bar"),
            Source::Point(index) => write!(f, "{}", index),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Point(index) => write!(f, "{}", index),
            Destination::Off => write!(f, "off"),
        }
    }
}
