mod gateway;

pub use gateway::IpfsContentStore;
