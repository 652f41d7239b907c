pub mod conversion;

pub mod v1 {
    tonic::include_proto!("cloudlab.v1");
}
