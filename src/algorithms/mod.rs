//! Graph algorithms (components, centrality, communities, cuts, traversal)
//!
//! Every function works on dense node indices of a [`SocialGraph`](crate::SocialGraph);
//! callers translate to and from [`NodeId`](crate::NodeId) at the edges.

pub mod assortativity;
pub mod centrality;
pub mod clustering;
pub mod cuts;
pub mod kcore;
pub mod louvain;
pub mod pagerank;
pub mod ranking;
pub mod recommend;
pub mod structure;
pub mod traversal;

pub use assortativity::degree_assortativity;
pub use centrality::{betweenness_centrality, closeness_centrality, degree_centrality};
pub use clustering::{
    induced_average_clustering, local_clustering, sampled_clustering, transitivity, triangles,
    ClusteringSample,
};
pub use cuts::{find_cuts, CutSets};
pub use kcore::{core_numbers, k_core, KCore};
pub use louvain::{louvain, modularity, CommunityDetectionResult};
pub use pagerank::{pagerank, DEFAULT_DAMPING};
pub use ranking::{by_score_desc, top_k};
pub use recommend::{adamic_adar, Recommendation, Recommendations};
pub use structure::{component_sizes, connected_components, count_components, largest_component};
pub use traversal::{
    bfs, bfs_distances, eccentricity, estimate_diameter, shortest_path, within_radius,
    DiameterEstimate, UNREACHED,
};
