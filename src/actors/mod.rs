mod partition_actor;

pub use partition_actor::PartitionActor;
