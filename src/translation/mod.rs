/*!
 * Translation of text blocks.
 *
 * - `gate`: makes sure the engine can translate the requested pair before a run
 * - `translator`: translates one block, turning engine failures into a visible
 *   sentinel so the rest of the document still gets translated
 */

pub mod gate;
pub mod translator;

pub use gate::CapabilityGate;
pub use translator::{BlockOutcome, BlockTranslator};
