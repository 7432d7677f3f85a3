//! Contact events emitted by the physics world

use super::body::BodyKind;
use super::world::BodyHandle;
use crate::foundation::math::Vec3;

/// Whether a pair started or stopped touching this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactPhase {
    /// The bodies were apart last step and touch now
    Began,
    /// The bodies touched last step and are apart now
    Ended,
}

/// A change in the touching state of two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// First body of the pair
    pub body_a: BodyHandle,
    /// Kind of the first body
    pub kind_a: BodyKind,
    /// Second body of the pair
    pub body_b: BodyHandle,
    /// Kind of the second body
    pub kind_b: BodyKind,
    /// Contact normal pointing from `body_a` toward `body_b` (last known for `Ended`)
    pub normal: Vec3,
    /// Began or ended
    pub phase: ContactPhase,
}

/// A contact event seen from one participant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The body on the other side of the contact
    pub other: BodyHandle,
    /// Kind of the other body
    pub other_kind: BodyKind,
    /// Contact normal pointing from the observing body toward `other`
    pub normal: Vec3,
    /// Began or ended
    pub phase: ContactPhase,
}

impl ContactEvent {
    /// View this event from `body`'s side, if it takes part in it
    pub fn involving(&self, body: BodyHandle) -> Option<Contact> {
        if self.body_a == body {
            Some(Contact {
                other: self.body_b,
                other_kind: self.kind_b,
                normal: self.normal,
                phase: self.phase,
            })
        } else if self.body_b == body {
            Some(Contact {
                other: self.body_a,
                other_kind: self.kind_a,
                normal: -self.normal,
                phase: self.phase,
            })
        } else {
            None
        }
    }
}

/// Contacts of `body` among `events`, in event order
pub fn contacts_of(events: &[ContactEvent], body: BodyHandle) -> impl Iterator<Item = Contact> + '_ {
    events.iter().filter_map(move |event| event.involving(body))
}
