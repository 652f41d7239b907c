//! Outcome reporter: pure formatting of a `DispatchOutcome` into the record
//! printed at the end of a run. Never fails; rendering the same outcome twice
//! produces identical output.

use cloudlab_core::{DispatchOutcome, OperationReply};

pub fn render(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Success { reply, flags } => {
            let mut record = render_reply(reply);
            if flags.app_done {
                record.push_str("\nApplication tier deployment complete");
            }
            if flags.db_done {
                record.push_str("\nDatabase tier deployment complete");
            }
            record
        }
        DispatchOutcome::Failure { kind, detail } => format!("Failure [{kind}]: {detail}"),
    }
}

fn render_reply(reply: &OperationReply) -> String {
    match reply {
        OperationReply::InstanceCreated {
            instance_id,
            public_ip,
        } => format!("Instance ID: {instance_id}\nPublic IP: {public_ip}"),
        OperationReply::InstanceDestroyed {
            instance_id,
            status,
        } => format!("{instance_id} status is: {status}"),
        OperationReply::ApplicationDeployed { output }
        | OperationReply::DatabaseDeployed { output }
        | OperationReply::AppConnectedToDatabase { output }
        | OperationReply::ModuleRan { output } => format!("Output: {output}"),
    }
}
