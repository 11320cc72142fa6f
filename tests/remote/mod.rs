mod fetch;
mod remote_add;
