mod shutdown_flow;
