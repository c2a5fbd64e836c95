//! # bnet-rs: Boolean networks and single-node cut analysis in Rust
//!
//! **`bnet-rs`** describes discrete-time Boolean dynamical networks and prepares them for
//! integrated-information analysis.
//!
//! ## What is a Boolean network?
//!
//! A Boolean network is a set of nodes, each holding one bit. Every node has a **mechanism**
//! (a logic gate such as AND, XOR or MAJORITY) and an ordered list of input nodes.
//! At each time step, all nodes update **synchronously**: every mechanism reads the current
//! state of its inputs and produces the node's next state.
//!
//! ## Key Features
//!
//! - **Ordered Networks**: Node order is fixed by declaration and used everywhere --- states,
//!   transition tables, connectivity matrices and subsystems all follow it.
//! - **Explicit State**: States are values passed into [`Network::update`][crate::network::Network::update],
//!   never hidden inside the network.
//! - **Two Index Conventions**: Low-order-first and high-order-first state indexing, with an explicit
//!   conversion step between them (see [`codec`]).
//! - **Structural Queries**: Neighborhoods and Markov blankets as induced [`Subsystem`][crate::subsystem::Subsystem]s.
//! - **Cut Analysis**: Estimates how much integrated information each single-node cut destroys,
//!   using any [`InformationOracle`][crate::oracle::InformationOracle].
//!
//! ## Basic Usage
//!
//! ```rust
//! use bnet_rs::codec::Convention;
//! use bnet_rs::network::{Network, NodeConfig};
//! use bnet_rs::state::{parse_state_config, State, StateConfig};
//! use bnet_rs::tpm::Tpm;
//!
//! // 1. Declare the network: (label, mechanism, inputs...)
//! let net = Network::build([
//!     NodeConfig::new("A", "OR", ["B", "C"]),
//!     NodeConfig::new("B", "AND", ["A", "C"]),
//!     NodeConfig::new("C", "XOR", ["A", "B"]),
//! ])
//! .unwrap();
//!
//! // 2. Describe a state: only A is on
//! let state = parse_state_config(&net, &StateConfig::on(["A"])).unwrap();
//! assert_eq!(state, State::from([1, 0, 0]));
//!
//! // 3. Step the dynamics
//! assert_eq!(net.update(&state).unwrap(), State::from([0, 0, 1]));
//!
//! // 4. Build the full transition table
//! let tpm = Tpm::build(&net, Convention::LowFirst);
//! assert_eq!(tpm.next_state(&state), State::from([0, 0, 1]));
//! ```
//!
//! ## Core Components
//!
//! - **[`gate`]** and **[`mechanism`]**: Node update functions.
//! - **[`network`]**: Network construction and dynamics.
//! - **[`codec`]** and **[`tpm`]**: State indexing and transition tables.
//! - **[`subsystem`]**: Neighborhoods, Markov blankets and induced subsystems.
//! - **[`cut`]**, **[`oracle`]** and **[`analysis`]**: Directional cuts and the cut-analysis engine.

pub mod analysis;
pub mod codec;
pub mod connectivity;
pub mod cut;
pub mod error;
pub mod gate;
pub mod mechanism;
pub mod network;
pub mod oracle;
pub mod state;
pub mod subsystem;
pub mod tpm;
