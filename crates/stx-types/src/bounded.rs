use std::mem;

use stx_wire::ByteCursor;

/// Capacity to reserve for a wire-declared count of `T`.
///
/// The count comes straight off the wire, so it is clamped to the number of
/// elements that could possibly fit in the bytes the cursor still holds.
/// Each element is charged the larger of its minimum encoded size and its
/// in-memory size, so the reservation never exceeds the remaining input.
/// A hostile count then costs nothing until the reads themselves fail.
pub(crate) fn capacity_for<T>(count: u32, cursor: &ByteCursor, min_encoded_size: usize) -> usize {
  let per_element = min_encoded_size.max(mem::size_of::<T>()).max(1);
  let fit = cursor.remaining() / per_element;
  usize::try_from(count).map_or(fit, |count| count.min(fit))
}
