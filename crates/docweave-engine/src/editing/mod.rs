/*!
 * # Edit compilation core
 *
 * This module turns a parsed content buffer plus its style annotations into
 * one ordered batch of position-addressed edit operations.
 *
 * ## Architecture Overview
 *
 * - **Buffer-relative annotations**: the parser and inline resolver anchor
 *   every style intent to byte offsets in the content buffer, before any
 *   remote offset is known.
 * - **Single cursor capture**: a [`cursor::DocumentCursor`] holds the target
 *   document's length, read once before the batch is built. Every absolute
 *   offset in the batch is `cursor + buffer offset`.
 * - **One insert, then styles**: a batch contains exactly one length-changing
 *   operation, the leading [`operation::EditOperation::InsertText`]. All
 *   later operations address text that insert has already placed, so no
 *   offset in the batch depends on any other length-changing edit.
 * - **Surgical marker strip**: bold/italic delimiters are removed from the
 *   inserted text by an explicit ordered list of delimiter deletions with an
 *   offset-recomputation rule, never by deleting and reinserting a styled
 *   range. Style ranges are shifted left past each removed delimiter and
 *   stay valid across the strip. See [`batch`] for the rule.
 *
 * ## Module Structure
 *
 * - **`annotation`**: buffer-relative style intents
 * - **`operation`**: the wire-shaped edit operations and style payloads
 * - **`cursor`**: the absolute insertion point for a batch
 * - **`batch`**: compilation of buffer + annotations into an operation batch
 */

pub mod annotation;
pub mod batch;
pub mod cursor;
pub mod operation;
