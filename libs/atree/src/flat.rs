use crate::{Node, ToBody};

/// For passing zero, one, two or n nodes from multiple branches of
/// code, where an owned array doesn't work because of the different
/// lengths.
pub enum Flat {
    None,
    One(Node),
    Two(Node, Node),
    Many(Vec<Node>),
}

impl ToBody for Flat {
    fn to_body(self) -> Vec<Node> {
        match self {
            Flat::None => Vec::new(),
            Flat::One(a) => vec![a],
            Flat::Two(a, b) => vec![a, b],
            Flat::Many(v) => v,
        }
    }
}

impl Flat {
    pub fn push_onto(self, body: &mut Vec<Node>) {
        match self {
            Flat::None => (),
            Flat::One(a) => body.push(a),
            Flat::Two(a, b) => {
                body.push(a);
                body.push(b);
            }
            Flat::Many(v) => body.extend(v),
        }
    }
}
