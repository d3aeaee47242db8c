use kstring::KString;

/// Conversion to `KString` for the types the builders accept.
/// `From` can't be extended with a blanket static-str optimization,
/// hence a separate trait.
pub trait ToKString {
    fn to_kstring(self) -> KString;
}

impl ToKString for &str {
    fn to_kstring(self) -> KString {
        KString::from_ref(self)
    }
}

impl ToKString for &&str {
    fn to_kstring(self) -> KString {
        KString::from_ref(*self)
    }
}

impl ToKString for String {
    fn to_kstring(self) -> KString {
        KString::from_string(self)
    }
}

impl ToKString for &String {
    fn to_kstring(self) -> KString {
        KString::from_ref(self)
    }
}

impl ToKString for KString {
    fn to_kstring(self) -> KString {
        self
    }
}

impl ToKString for &KString {
    fn to_kstring(self) -> KString {
        self.clone()
    }
}

impl ToKString for usize {
    fn to_kstring(self) -> KString {
        KString::from_string(self.to_string())
    }
}
