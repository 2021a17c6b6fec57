pub mod remote_object_info;

pub use remote_object_info::RemoteObjectInfo;
