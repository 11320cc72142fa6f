mod clean_working_copy;
mod report_changes;
