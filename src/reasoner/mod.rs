//! The warrant procedure: dialectical trees and the reasoner built on top of them.

mod delp_reasoner;
pub use delp_reasoner::DelpAnswer;
pub use delp_reasoner::DelpReasoner;

mod dialectical_tree;
pub use dialectical_tree::DialecticalTree;
pub use dialectical_tree::Mark;
pub use dialectical_tree::NodeId;

mod search_limits;
pub use search_limits::SearchLimits;
