mod codec;
#[allow(clippy::module_inception)]
mod device;
mod device_kind;

pub use {codec::Codec, device::Device, device_kind::DeviceKind};
