//! Field decoders for every OWF structure, top down.
//!
//! Each decoder works inside the budget of the segment it was handed and
//! dispatches the entity it builds to the reader's visitor. A container
//! that is rejected returns early; the segment engine then drains its
//! unread children.
//!
//! ```text
//!   document  = magic [len] { [len] channel }*
//!   channel   = [len] id { [len] namespace }*
//!   namespace = t0 dt [len] id [len] signal* [len] event* [len] alarm*
//!   signal    = [len] id [len] unit [len] samples
//!   event     = time [len] data
//!   alarm     = time [len] data
//! ```

use std::io::Read;

use log::debug;
use owf_types::{Alarm, ByteString, Channel, Event, Namespace, Signal};
use owf_wire::Budget;
use owf_wire::header::check_magic;

use crate::error::DecodeError;
use crate::reader::Reader;
use crate::visitor::{Entity, Visitor};

/// Read a byte string spanning the whole enclosing segment.
///
/// Must be reached through `unwrap`, since the length comes from there.
pub(crate) fn read_string<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<ByteString, DecodeError> {
    let length = budget.remaining();
    r.read_bytes(budget, length).map(ByteString::new)
}

/// Read a sample array spanning the whole enclosing segment.
pub(crate) fn read_samples<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<Vec<f64>, DecodeError> {
    let length = budget.remaining();
    r.read_doubles(budget, length)
}

pub(crate) fn read_signal<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<(), DecodeError> {
    let id = r.unwrap(budget, read_string)?;
    let unit = r.unwrap(budget, read_string)?;
    let samples = r.unwrap(budget, read_samples)?;

    r.dispatch(Entity::Signal(Signal { id, unit, samples }));
    Ok(())
}

pub(crate) fn read_event<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<(), DecodeError> {
    let time = r.read_time(budget)?;
    let data = r.unwrap(budget, read_string)?;

    r.dispatch(Entity::Event(Event { time, data }));
    Ok(())
}

pub(crate) fn read_alarm<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<(), DecodeError> {
    let time = r.read_time(budget)?;
    let data = r.unwrap(budget, read_string)?;

    r.dispatch(Entity::Alarm(Alarm { time, data }));
    Ok(())
}

pub(crate) fn read_namespace<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<(), DecodeError> {
    let t0 = r.read_time(budget)?;
    let dt = r.read_time(budget)?;
    let id = r.unwrap(budget, read_string)?;

    if r.dispatch(Entity::Namespace(Namespace::new(id, t0, dt))).is_reject() {
        return Ok(());
    }

    // Each group is one envelope over a run of unbracketed items.
    r.unwrap(budget, |r, group| r.unwrap_multi(group, read_signal))?;
    r.unwrap(budget, |r, group| r.unwrap_multi(group, read_event))?;
    r.unwrap(budget, |r, group| r.unwrap_multi(group, read_alarm))?;

    if !budget.is_exhausted() {
        debug!(
            "namespace carries {} bytes after its alarm group, skipping",
            budget.remaining()
        );
    }
    Ok(())
}

pub(crate) fn read_channel<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
    budget: &mut Budget,
) -> Result<(), DecodeError> {
    let id = r.unwrap(budget, read_string)?;

    if r.dispatch(Entity::Channel(Channel::new(id))).is_reject() {
        return Ok(());
    }

    r.unwrap_nested_multi(budget, read_namespace)
}

/// Top-level entry: magic, then one segment of length-bracketed channels.
///
/// Returns the size of the top-level segment, header included.
pub(crate) fn read_document<R: Read, V: Visitor>(
    r: &mut Reader<'_, R, V>,
) -> Result<u64, DecodeError> {
    let mut magic = [0u8; 4];
    r.pull(&mut magic)?;
    check_magic(magic)?;

    let ((), total) = r.unwrap_top(|r, budget| r.unwrap_nested_multi(budget, read_channel))?;
    Ok(total)
}
